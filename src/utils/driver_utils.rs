use crate::models::{
    driver::Driver,
    slider::{HomeSliderItem, DEFAULT_BANNER},
};

pub const DEFAULT_TOP_DRIVERS: usize = 10;

/// The driver ranked first. With several claimants the first one in feed
/// order wins; nothing is inferred from other fields.
pub fn select_leading_driver(drivers: &[Driver]) -> Option<&Driver> {
    select_driver_by_position(drivers, 1)
}

pub fn select_driver_by_position(drivers: &[Driver], position: u32) -> Option<&Driver> {
    drivers
        .iter()
        .find(|driver| driver.position == Some(position))
}

pub fn select_drivers_by_team<'a>(drivers: &'a [Driver], team_id: &str) -> Vec<&'a Driver> {
    drivers
        .iter()
        .filter(|driver| driver.team_id == team_id)
        .collect()
}

/// Stable sort by position, unranked drivers last, truncated to `limit`.
pub fn select_top_drivers(drivers: &[Driver], limit: usize) -> Vec<&Driver> {
    let mut ranked: Vec<&Driver> = drivers.iter().collect();
    ranked.sort_by_key(|driver| driver.position.unwrap_or(u32::MAX));
    ranked.truncate(limit);
    ranked
}

pub fn home_slider_items(leading: Option<&Driver>) -> Vec<HomeSliderItem> {
    let mut items = Vec::with_capacity(2);
    if let Some(driver) = leading {
        items.push(HomeSliderItem::DriverInfo {
            position: format!("{:02}", driver.position.unwrap_or_default()),
            wins: format!("{:02}", driver.wins),
            points: driver.points.to_string(),
            driver_name: driver.given_name.clone(),
            team_name: driver.team_name.clone(),
            podiums: driver.podiums,
            poles: driver.poles,
        });
    }
    items.push(HomeSliderItem::Banner {
        banner: DEFAULT_BANNER.to_string(),
    });
    items
}
