use scraper::{ElementRef, Html, Selector};

/// What to read off the leaf node once the descent lands on it.
#[derive(Debug, Clone)]
pub enum TargetValue {
    Text,
    Attr(String),
}

/// Locates a value inside a page by marker: find the nodes matching
/// `marker_selector` whose text contains `marker_text`, take the first,
/// climb to the nearest `ancestor_tag`.`ancestor_class` ancestor, then walk
/// the `descent` selector chain taking the first match at every step.
#[derive(Debug, Clone)]
pub struct ExtractRule {
    pub marker_selector: String,
    pub marker_text: String,
    pub ancestor_tag: String,
    pub ancestor_class: String,
    pub descent: Vec<String>,
    pub target: TargetValue,
}

/// None as soon as any step finds zero matches. Candidate order is document
/// order, there is no disambiguation between multiple marker hits.
pub fn extract_first(document: &Html, rule: &ExtractRule) -> Option<String> {
    let marker_selector = Selector::parse(&rule.marker_selector).ok()?;
    let marker = document
        .select(&marker_selector)
        .find(|element| element_text(element).contains(&rule.marker_text))?;

    let container = nearest_ancestor(&marker, &rule.ancestor_tag, &rule.ancestor_class)?;

    let mut node = container;
    for step in &rule.descent {
        let selector = Selector::parse(step).ok()?;
        node = node.select(&selector).next()?;
    }

    let value = match &rule.target {
        TargetValue::Text => element_text(&node),
        TargetValue::Attr(name) => node.value().attr(name)?.to_string(),
    };
    let value = value.trim().to_string();
    match value.is_empty() {
        true => None,
        false => Some(value),
    }
}

fn nearest_ancestor<'a>(element: &ElementRef<'a>, tag: &str, class: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|candidate| {
            candidate.value().name() == tag
                && candidate.value().classes().any(|c| c == class)
        })
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::{extract_first, ExtractRule, TargetValue};

    const CHART_PAGE: &str = r#"
        <html><body>
        <ul>
            <li class="info_box">
                <span class="info_txt">미국</span>
                <strong class="title"><a href="/title/100">Foreign Show</a></strong>
            </li>
            <li class="info_box">
                <span class="info_txt">공개일 2025. 한국</span>
                <strong class="title"><a href="/title/200">폭싹 속았수다</a></strong>
            </li>
        </ul>
        </body></html>
    "#;

    fn title_rule() -> ExtractRule {
        ExtractRule {
            marker_selector: "span.info_txt".to_string(),
            marker_text: "한국".to_string(),
            ancestor_tag: "li".to_string(),
            ancestor_class: "info_box".to_string(),
            descent: vec!["strong.title".to_string(), "a".to_string()],
            target: TargetValue::Text,
        }
    }

    #[test]
    fn extracts_leaf_text_through_the_chain() {
        let document = Html::parse_document(CHART_PAGE);

        let value = extract_first(&document, &title_rule());

        assert_eq!(value, Some("폭싹 속았수다".to_string()));
    }

    #[test]
    fn none_when_marker_text_is_absent() {
        let document = Html::parse_document(CHART_PAGE);
        let mut rule = title_rule();
        rule.marker_text = "일본".to_string();

        assert_eq!(extract_first(&document, &rule), None);
    }

    #[test]
    fn none_when_ancestor_does_not_match() {
        let document = Html::parse_document(CHART_PAGE);
        let mut rule = title_rule();
        rule.ancestor_class = "detail_box".to_string();

        assert_eq!(extract_first(&document, &rule), None);
    }

    #[test]
    fn none_when_a_descent_step_misses() {
        let document = Html::parse_document(CHART_PAGE);
        let mut rule = title_rule();
        rule.descent = vec!["strong.title".to_string(), "img".to_string()];

        assert_eq!(extract_first(&document, &rule), None);
    }

    #[test]
    fn reads_attributes_off_the_leaf() {
        let page = r#"
            <div class="viewer_box">
                <span class="label">detail view</span>
                <div class="image"><img src="https://img.example.com/full.jpg"></div>
            </div>
        "#;
        let document = Html::parse_document(page);
        let rule = ExtractRule {
            marker_selector: "span.label".to_string(),
            marker_text: "detail".to_string(),
            ancestor_tag: "div".to_string(),
            ancestor_class: "viewer_box".to_string(),
            descent: vec!["div.image".to_string(), "img".to_string()],
            target: TargetValue::Attr("src".to_string()),
        };

        assert_eq!(
            extract_first(&document, &rule),
            Some("https://img.example.com/full.jpg".to_string())
        );
    }
}
