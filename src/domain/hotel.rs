use super::work_row::cell;

/// Hotel details the post pipeline reads from ledger columns G through L.
#[derive(Debug, Clone)]
pub struct HotelDetails {
    pub hotel_name: String,
    pub price: String,
    pub address: String,
    pub star: String,
    pub reviews: String,
    pub extra_info: String,
}

const HOTEL_NAME_COLUMN: usize = 6; // G

impl HotelDetails {
    /// None when the row carries no hotel name yet.
    pub fn from_row(row: &[String]) -> Option<Self> {
        let hotel_name = cell(row, HOTEL_NAME_COLUMN);
        match hotel_name.is_empty() {
            true => None,
            false => Some(HotelDetails {
                hotel_name,
                price: cell(row, 7),
                address: cell(row, 8),
                star: cell(row, 9),
                reviews: cell(row, 10),
                extra_info: cell(row, 11),
            }),
        }
    }

    /// Plain-text rendering handed to the writing model alongside the prompt.
    pub fn brief(&self) -> String {
        format!(
            "hotel_name: {}\nprice: {}\naddress: {}\nstar: {}\nreviews: {}\nextra_info: {}",
            self.hotel_name, self.price, self.address, self.star, self.reviews, self.extra_info
        )
    }
}

/// Fields scraped off a live listing page, written back as one row chunk
/// starting at the status column.
#[derive(Debug, Clone)]
pub struct HotelSummary {
    pub updated_at: String,
    pub name: String,
    pub price: String,
    pub location: String,
    pub rating: String,
    pub features: String,
    pub reviews_summary: String,
}

impl HotelSummary {
    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.updated_at,
            self.name,
            self.price,
            self.location,
            self.rating,
            self.features,
            self.reviews_summary,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::HotelDetails;

    #[test]
    fn from_row_reads_columns_g_through_l() {
        let row: Vec<String> = [
            "Regalia Gold Hotel",
            "2025-03-01 10:00:00",
            "2025-02-28 09:00:00",
            "https://blog.example.com/p/1",
            "https://www.agoda.com/regalia-gold-hotel",
            "2025-02-27 08:00:00",
            "레갈리아 골드 호텔",
            "₩54,000",
            "39-41 Nguyen Thi Minh Khai, Nha Trang",
            "5성급",
            "Great pool, Clean rooms",
            "Breakfast included",
        ]
        .iter()
        .map(|cell| cell.to_string())
        .collect();

        let details = HotelDetails::from_row(&row).unwrap();

        assert_eq!(details.hotel_name, "레갈리아 골드 호텔");
        assert_eq!(details.price, "₩54,000");
        assert_eq!(details.extra_info, "Breakfast included");
    }

    #[test]
    fn from_row_none_without_hotel_name() {
        let row = vec!["Regalia Gold Hotel".to_string(); 6];

        assert!(HotelDetails::from_row(&row).is_none());
    }

    #[test]
    fn brief_lists_every_field() {
        let details = HotelDetails {
            hotel_name: "Libera Hotel".to_string(),
            price: "₩41,000".to_string(),
            address: "Nha Trang".to_string(),
            star: "4성급".to_string(),
            reviews: "Quiet, friendly staff".to_string(),
            extra_info: "Airport pickup".to_string(),
        };

        let brief = details.brief();

        assert!(brief.contains("hotel_name: Libera Hotel"));
        assert!(brief.contains("extra_info: Airport pickup"));
    }
}
