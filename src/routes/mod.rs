pub mod chart_route;
pub mod default_route;
pub mod exp_route;
pub mod image_route;
pub mod listing_route;
pub mod post_route;
