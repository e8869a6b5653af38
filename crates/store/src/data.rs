//! Data store: the chart's data points and their derived projection

use crate::{skip, Applied};
use dataviz_config::{ChartConfig, MutationPolicy};
use dataviz_shared::{ChartSeries, DashboardError, DataPoint, DataState, SeriesStyle};

const COMPONENT: &str = "DataStore";

/// Owner of the data points feeding the chart
///
/// `derived_chart` is recomputed from `points` after every mutation and is
/// never written any other way.
#[derive(Debug, Clone)]
pub struct DataStore {
    state: DataState,
    policy: MutationPolicy,
    series_name: String,
    style: SeriesStyle,
    generation: u64,
}

impl DataStore {
    pub fn new(points: Vec<DataPoint>, chart: &ChartConfig, policy: MutationPolicy) -> Self {
        let mut store = Self {
            state: DataState::default(),
            policy,
            series_name: chart.series_name.clone(),
            style: chart.style.clone(),
            generation: 0,
        };
        store.state.points = points;
        store.recompute();
        store
    }

    pub fn state(&self) -> &DataState {
        &self.state
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.state.points
    }

    pub fn chart(&self) -> &ChartSeries {
        &self.state.derived_chart
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn find(&self, point_id: &str) -> Option<&DataPoint> {
        self.state.points.iter().find(|p| p.id == point_id)
    }

    fn recompute(&mut self) {
        self.state.derived_chart =
            ChartSeries::from_points(&self.state.points, &self.series_name, &self.style);
    }

    fn commit(&mut self) -> Applied {
        self.recompute();
        self.generation += 1;
        Ok(true)
    }

    /// Replace every point
    pub fn set_points(&mut self, points: Vec<DataPoint>) {
        log::debug!("[{}] Loaded {} points", COMPONENT, points.len());
        self.state.points = points;
        self.recompute();
        self.generation += 1;
    }

    pub fn add_point(&mut self, point: DataPoint) {
        self.state.points.push(point);
        self.recompute();
        self.generation += 1;
    }

    /// Drop every point with `point_id`
    pub fn remove_point(&mut self, point_id: &str) -> Applied {
        let before = self.state.points.len();
        self.state.points.retain(|p| p.id != point_id);

        if self.state.points.len() == before {
            return skip(
                self.policy,
                COMPONENT,
                DashboardError::not_found("data point", point_id),
            );
        }
        self.commit()
    }

    /// Replace the first point with the same id
    pub fn update_point(&mut self, point: DataPoint) -> Applied {
        match self.state.points.iter().position(|p| p.id == point.id) {
            Some(index) => {
                self.state.points[index] = point;
                self.commit()
            }
            None => skip(
                self.policy,
                COMPONENT,
                DashboardError::not_found("data point", &point.id),
            ),
        }
    }

    /// Select a point for the detail view, or clear the selection
    pub fn select(&mut self, point: Option<&DataPoint>) {
        self.state.selected_point_id = point.map(|p| p.id.clone());
        self.generation += 1;
    }

    /// Select the point drawn at chart position `index`. Out-of-range
    /// indices leave the selection alone.
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(id) = self.state.points.get(index).map(|p| p.id.clone()) else {
            log::debug!("[{}] No point at chart index {}", COMPONENT, index);
            return false;
        };
        self.state.selected_point_id = Some(id);
        self.generation += 1;
        true
    }

    /// Resolve the selection; `None` once the point is gone
    pub fn selected_point(&self) -> Option<&DataPoint> {
        self.state
            .selected_point_id
            .as_deref()
            .and_then(|id| self.find(id))
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
        self.generation += 1;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.state.error = error;
        self.generation += 1;
    }
}
