use serde::{Deserialize, Deserializer, Serialize};

pub const NO_PROVIDERS: &str =
    "No OTT provider information available for this movie in your region.";

const LIST_OVERVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    pub tmdb_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub tmdb_id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub runtime: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub backdrop_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub providers: Vec<Provider>,
}

/// A streaming service carrying a title, e.g. `Netflix` / `subscription`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(rename = "type", default)]
    pub offer_type: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn rating_label(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() => format!("{:.1}", r),
        _ => "N/A".to_string(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl SearchResultItem {
    pub fn title_label(&self) -> &str {
        non_empty(&self.title).unwrap_or("Untitled")
    }

    pub fn rating_label(&self) -> String {
        rating_label(self.rating)
    }

    pub fn release_label(&self) -> &str {
        non_empty(&self.release_date).unwrap_or("Unknown year")
    }

    /// Overview cut to the list width, counted in characters.
    pub fn overview_snippet(&self) -> String {
        match non_empty(&self.overview) {
            Some(text) => {
                let mut chars = text.chars();
                let head: String = chars.by_ref().take(LIST_OVERVIEW_CHARS).collect();
                if chars.next().is_some() {
                    format!("{}...", head.trim_end())
                } else {
                    head
                }
            }
            None => "No description".to_string(),
        }
    }

    pub fn poster(&self) -> Option<&str> {
        non_empty(&self.poster_url)
    }
}

impl MovieDetails {
    pub fn title_label(&self) -> &str {
        non_empty(&self.title).unwrap_or("Untitled")
    }

    pub fn release_label(&self) -> &str {
        non_empty(&self.release_date).unwrap_or("Unknown date")
    }

    /// Release date, runtime and rating joined with bullets; absent parts are skipped.
    pub fn meta_line(&self) -> String {
        let mut line = self.release_label().to_string();
        if let Some(minutes) = self.runtime.filter(|m| *m > 0) {
            line.push_str(&format!(" • {} min", minutes));
        }
        if self.rating.is_some_and(f64::is_finite) {
            line.push_str(&format!(" • ⭐ {}", rating_label(self.rating)));
        }
        line
    }

    pub fn overview_text(&self) -> &str {
        non_empty(&self.overview).unwrap_or("No description available.")
    }

    pub fn genres_label(&self) -> String {
        let genres: Vec<&str> = self
            .genres
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .collect();
        if genres.is_empty() {
            "N/A".to_string()
        } else {
            genres.join(", ")
        }
    }

    pub fn poster(&self) -> Option<&str> {
        non_empty(&self.poster_url)
    }

    pub fn backdrop(&self) -> Option<&str> {
        non_empty(&self.backdrop_url)
    }

    pub fn provider_labels(&self) -> Vec<String> {
        self.providers.iter().map(Provider::label).collect()
    }
}

impl Provider {
    pub fn label(&self) -> String {
        let name = non_empty(&self.provider_name).unwrap_or("Unknown provider");
        match non_empty(&self.offer_type) {
            Some(kind) => format!("{} • {}", name, kind),
            None => name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_item() -> SearchResultItem {
        serde_json::from_str(r#"{"tmdbId": 7}"#).unwrap()
    }

    #[test]
    fn search_item_decodes_with_only_an_id() {
        let item = bare_item();
        assert_eq!(item.tmdb_id, 7);
        assert_eq!(item.title_label(), "Untitled");
        assert_eq!(item.rating_label(), "N/A");
        assert_eq!(item.release_label(), "Unknown year");
        assert_eq!(item.overview_snippet(), "No description");
        assert!(item.poster().is_none());
    }

    #[test]
    fn null_rating_is_not_applicable() {
        let item: SearchResultItem =
            serde_json::from_str(r#"{"tmdbId": 1, "rating": null, "title": "Leo"}"#).unwrap();
        assert_eq!(item.rating_label(), "N/A");
        assert_eq!(item.title_label(), "Leo");
    }

    #[test]
    fn rating_has_one_decimal() {
        assert_eq!(rating_label(Some(7.25)), "7.2");
        assert_eq!(rating_label(Some(8.0)), "8.0");
        assert_eq!(rating_label(Some(f64::NAN)), "N/A");
    }

    #[test]
    fn long_overview_is_truncated_on_char_boundary() {
        let mut item = bare_item();
        item.overview = Some("é".repeat(120));
        let snippet = item.overview_snippet();
        assert!(snippet.ends_with("..."));
        assert_eq!(snippet.chars().count(), 83);
    }

    #[test]
    fn short_overview_is_kept_whole() {
        let mut item = bare_item();
        item.overview = Some("A heist in space.".to_string());
        assert_eq!(item.overview_snippet(), "A heist in space.");
    }

    #[test]
    fn details_decode_camel_case_and_provider_type() {
        let details: MovieDetails = serde_json::from_str(
            r#"{
                "tmdbId": 157336,
                "title": "Interstellar",
                "runtime": 169,
                "rating": 8.4,
                "releaseDate": "2014-11-05",
                "genres": ["Adventure", "Drama"],
                "posterUrl": "https://img/p.jpg",
                "providers": [{"providerName": "Netflix", "type": "subscription"}]
            }"#,
        )
        .unwrap();
        assert_eq!(details.meta_line(), "2014-11-05 • 169 min • ⭐ 8.4");
        assert_eq!(details.genres_label(), "Adventure, Drama");
        assert_eq!(details.provider_labels(), vec!["Netflix • subscription"]);
        assert_eq!(details.poster(), Some("https://img/p.jpg"));
        assert!(details.backdrop().is_none());
    }

    #[test]
    fn details_fallbacks_for_missing_fields() {
        let details: MovieDetails = serde_json::from_str(r#"{"tmdbId": 1, "runtime": 0}"#).unwrap();
        assert_eq!(details.meta_line(), "Unknown date");
        assert_eq!(details.overview_text(), "No description available.");
        assert_eq!(details.genres_label(), "N/A");
        assert!(details.provider_labels().is_empty());
    }

    #[test]
    fn null_lists_decode_as_empty() {
        let details: MovieDetails =
            serde_json::from_str(r#"{"tmdbId": 1, "genres": null, "providers": null}"#).unwrap();
        assert!(details.genres.is_empty());
        assert!(details.providers.is_empty());
        assert_eq!(details.genres_label(), "N/A");
        assert!(details.provider_labels().is_empty());
    }

    #[test]
    fn provider_without_type_shows_name_only() {
        let provider = Provider {
            provider_name: Some("JioCinema".to_string()),
            offer_type: None,
        };
        assert_eq!(provider.label(), "JioCinema");
    }
}
