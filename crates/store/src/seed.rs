//! Sample data the dashboard starts with

use chrono::{TimeZone, Utc};
use dataviz_shared::{DataPoint, Metadata, Variable, VariableGroup, VariableOption};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// Fixed so that startup state is reproducible.
const MONTHLY_VALUES: [f64; 12] = [
    65.0, 59.0, 80.0, 81.0, 56.0, 55.0, 40.0, 72.0, 90.0, 48.0, 77.0, 104.0,
];

pub fn sample_variable_groups() -> Vec<VariableGroup> {
    vec![
        VariableGroup::new(
            "primary-variables",
            "Primary Variables",
            vec![
                Variable::new(
                    "variable1",
                    "Estimated Cost",
                    428.07,
                    "The estimated cost of charging based on current rates and usage patterns.",
                    true,
                ),
                Variable::new(
                    "variable2",
                    "Fleet Growth",
                    33.07,
                    "The percentage growth of the fleet over the selected time period.",
                    true,
                ),
                Variable::new(
                    "variable3",
                    "Estimated Charge",
                    21.9,
                    "The estimated charge percentage based on current usage patterns.",
                    true,
                ),
                Variable::new(
                    "variable4",
                    "Fleet Growth",
                    7.03,
                    "The percentage growth of the fleet over the selected time period.",
                    true,
                ),
            ],
        ),
        VariableGroup::new(
            "secondary-variables",
            "Secondary Variables",
            vec![
                Variable::new(
                    "variable5",
                    "Peak Usage Time",
                    "14:00-16:00",
                    "The time period with the highest charging station usage.",
                    false,
                ),
                Variable::new(
                    "variable6",
                    "Average Charge Time",
                    45.0,
                    "The average time in minutes spent at a charging station.",
                    false,
                ),
                Variable::new(
                    "variable7",
                    "Enable Notifications",
                    true,
                    "Enable push notifications for charging status updates.",
                    true,
                ),
                Variable::new(
                    "variable8",
                    "Data Source",
                    "api",
                    "The source of data for the visualization.",
                    true,
                )
                .with_options(vec![
                    VariableOption::new("API", "api"),
                    VariableOption::new("Database", "database"),
                    VariableOption::new("File Upload", "file"),
                ]),
            ],
        ),
    ]
}

/// Twelve monthly points for 2023
pub fn sample_data_points() -> Vec<DataPoint> {
    MONTHS
        .iter()
        .zip(MONTHLY_VALUES)
        .enumerate()
        .filter_map(|(index, (month, value))| {
            let timestamp = Utc
                .with_ymd_and_hms(2023, index as u32 + 1, 1, 0, 0, 0)
                .single()?;

            let category = match index % 3 {
                0 => "Category A",
                1 => "Category B",
                _ => "Category C",
            };
            let region = if index % 2 == 0 { "North" } else { "South" };

            let mut metadata = Metadata::new();
            metadata.insert("category".to_string(), category.into());
            metadata.insert("region".to_string(), region.into());

            Some(
                DataPoint::new(format!("data-{index}"), *month, value, timestamp)
                    .with_metadata(metadata),
            )
        })
        .collect()
}
