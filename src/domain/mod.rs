pub mod artifact;
pub mod hotel;
pub mod scrape_result;
pub mod work_row;
