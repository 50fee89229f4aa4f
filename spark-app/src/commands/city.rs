use spark_core::City;

use crate::models::input::{SearchCitiesInput, ValidateExt};
use crate::state::AppState;
use crate::utils::simulate_latency;

/// Cities shown in the popular row of the explore screen
pub const POPULAR_CITY_COUNT: usize = 5;

/// Every city, in id order
pub async fn list_cities(state: &AppState) -> Vec<City> {
    simulate_latency(state.config.cities_latency).await;
    state.store.list_cities()
}

/// The cities with the most active users, busiest first
pub async fn popular_cities(state: &AppState) -> Vec<City> {
    simulate_latency(state.config.cities_latency).await;
    state.store.popular_cities(POPULAR_CITY_COUNT)
}

/// Case-insensitive match on city name or country. An empty query returns
/// every city.
pub fn search_cities(state: &AppState, input: SearchCitiesInput) -> Result<Vec<City>, String> {
    input.validate_input()?;

    let query = input.query.trim().to_lowercase();
    let cities = state.store.list_cities();
    if query.is_empty() {
        return Ok(cities);
    }
    Ok(cities.into_iter().filter(|c| c.matches(&query)).collect())
}
