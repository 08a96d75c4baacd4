use rand::seq::SliceRandom;

pub const IMAGE_PLACEHOLDER: &str = "(image)";

/// Body used when no image links could be resolved, the post still goes out.
pub fn image_fallback_body(hotel_name: &str) -> String {
    format!("## {}\n\n(이미지를 불러오지 못했습니다.)\n\n", hotel_name)
}

/// Substitutes one image link per placeholder occurrence, left to right.
/// Leftover placeholders stay put when the model emitted more than we have
/// links for.
pub fn substitute_image_links(body: &str, links: &[String]) -> String {
    let mut body = body.to_string();
    for link in links {
        body = body.replacen(IMAGE_PLACEHOLDER, &format!("![이미지]({})", link), 1);
    }
    body
}

/// Appends one randomly picked closing remark from the operator pool.
pub fn append_closing_remark(body: &str, remarks: &[String]) -> String {
    match remarks.choose(&mut rand::thread_rng()) {
        Some(remark) => format!("{}\n\n{}", body.trim_end(), remark),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{append_closing_remark, image_fallback_body, substitute_image_links};

    #[test]
    fn substitutes_one_link_per_placeholder() {
        let body = "intro\n\n(image)\n\nmiddle\n\n(image)\n\nend";
        let links = vec![
            "https://dl.example.com/a.jpg".to_string(),
            "https://dl.example.com/b.jpg".to_string(),
        ];

        let rendered = substitute_image_links(body, &links);

        assert!(rendered.contains("![이미지](https://dl.example.com/a.jpg)"));
        assert!(rendered.contains("![이미지](https://dl.example.com/b.jpg)"));
        assert!(!rendered.contains("(image)"));
    }

    #[test]
    fn extra_placeholders_survive_when_links_run_out() {
        let body = "(image) (image) (image)";
        let links = vec!["https://dl.example.com/a.jpg".to_string()];

        let rendered = substitute_image_links(body, &links);

        assert_eq!(rendered.matches("(image)").count(), 2);
    }

    #[test]
    fn substitution_order_is_left_to_right() {
        let body = "first:(image) second:(image)";
        let links = vec!["A".to_string(), "B".to_string()];

        let rendered = substitute_image_links(body, &links);

        assert_eq!(rendered, "first:![이미지](A) second:![이미지](B)");
    }

    #[test]
    fn closing_remark_comes_from_the_pool() {
        let remarks = vec!["다음 포스팅에서 만나요!".to_string()];

        let rendered = append_closing_remark("body", &remarks);

        assert_eq!(rendered, "body\n\n다음 포스팅에서 만나요!");
    }

    #[test]
    fn empty_pool_leaves_the_body_untouched() {
        assert_eq!(append_closing_remark("body", &[]), "body");
    }

    #[test]
    fn fallback_body_names_the_hotel() {
        assert!(image_fallback_body("Libera Hotel").starts_with("## Libera Hotel"));
    }
}
