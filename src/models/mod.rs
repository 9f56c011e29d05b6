pub mod forecast;
pub mod openweather_forecast;
