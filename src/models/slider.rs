use serde::Serialize;

pub const DEFAULT_BANNER: &str = "banner";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HomeSliderItem {
    DriverInfo {
        position: String,
        wins: String,
        points: String,
        driver_name: String,
        team_name: String,
        podiums: u32,
        poles: u32,
    },
    Banner {
        banner: String,
    },
}
