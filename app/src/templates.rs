use crate::models::{MovieDetails, SearchResultItem, NO_PROVIDERS};
use crate::view::FinderView;

const PLACEHOLDER_POSTER: &str = "/static/placeholder.svg";

pub fn render_page(view: &FinderView, region: &str) -> String {
    let mut html = String::new();

    html.push_str(&base_start("Movie OTT Finder"));

    html.push_str(&format!(
        r#"<div class="app-shell"><div class="glass-card"><header class="app-header"><h1>🎬 Movie OTT Finder</h1><p class="app-subtitle">Search any movie and see where it's streaming (based on TMDB watch providers, region {})</p></header>"#,
        escape(region)
    ));

    html.push_str(&render_search_form(view));

    if let Some(ref err) = view.error {
        html.push_str(&format!(
            r#"<div class="alert alert-danger" role="alert">{}</div>"#,
            escape(err)
        ));
    }

    html.push_str(r#"<div class="columns">"#);
    html.push_str(&render_results(view));
    html.push_str(&render_details(view, region));
    html.push_str("</div></div></div>");

    html.push_str(&base_end());
    html
}

fn render_search_form(view: &FinderView) -> String {
    let (label, disabled) = if view.loading {
        ("Searching...", " disabled")
    } else {
        ("Search", "")
    };

    format!(
        r#"<form class="search-form" action="/search" method="GET"><input type="text" class="search-input" name="q" placeholder="Try: Leo, Kantara, KGF, Interstellar..." value="{}"><button class="btn btn-primary" type="submit"{}>{}</button></form>"#,
        escape(&view.query),
        disabled,
        label
    )
}

fn render_results(view: &FinderView) -> String {
    let mut html = String::new();

    html.push_str(r#"<section class="results-column"><div class="column-head"><span class="details-label">Results</span>"#);
    if !view.results.is_empty() {
        html.push_str(&format!(
            r#"<span class="badge">{}</span>"#,
            view.results.len()
        ));
    }
    html.push_str("</div>");

    if view.results_placeholder_visible() {
        html.push_str(
            r#"<p class="placeholder-text">No results yet. Start by searching for a movie above.</p>"#,
        );
    }

    html.push_str(r#"<ul class="results-list">"#);
    for movie in &view.results {
        html.push_str(&render_result_item(movie, view.is_active(movie.tmdb_id)));
    }
    html.push_str("</ul></section>");
    html
}

fn render_result_item(movie: &SearchResultItem, active: bool) -> String {
    let class = if active {
        "movie-item active"
    } else {
        "movie-item"
    };
    let poster = movie.poster().unwrap_or(PLACEHOLDER_POSTER);

    format!(
        r#"<li class="{}"><a href="/select/{}"><img class="thumb" src="{}" alt="{}" onerror="this.src='{}'"><div class="movie-body"><div class="movie-row"><span class="movie-title">{}</span><small class="movie-meta">⭐ {}</small></div><small class="movie-meta">{}</small><div class="movie-overview"><small>{}</small></div></div></a></li>"#,
        class,
        movie.tmdb_id,
        escape(poster),
        escape(movie.title_label()),
        PLACEHOLDER_POSTER,
        escape(movie.title_label()),
        movie.rating_label(),
        escape(movie.release_label()),
        escape(&movie.overview_snippet())
    )
}

fn render_details(view: &FinderView, region: &str) -> String {
    let mut html = String::new();

    html.push_str(r#"<section class="details-column"><div class="details-card"><div class="column-head"><span class="details-label">Details</span>"#);
    if view.details_loading {
        html.push_str(r#"<span class="spinner" aria-label="Loading"></span>"#);
    }
    html.push_str("</div>");

    if !view.details_loading {
        match view.selected {
            Some(ref movie) => html.push_str(&render_movie(movie, region)),
            None => html.push_str(
                r#"<p class="placeholder-text">Select a movie from the left to see its details &amp; OTT platforms.</p>"#,
            ),
        }
    }

    html.push_str("</div></section>");
    html
}

fn render_movie(movie: &MovieDetails, region: &str) -> String {
    let mut html = String::new();

    let backdrop = movie
        .backdrop()
        .map(|url| format!(r#" style="background-image: linear-gradient(rgba(0,0,0,0.7), rgba(0,0,0,0.9)), url('{}');""#, escape(url)))
        .unwrap_or_default();
    html.push_str(&format!(r#"<div class="detail-hero"{}>"#, backdrop));

    let info_class = match movie.poster() {
        Some(poster) => {
            html.push_str(&format!(
                r#"<img class="detail-poster" src="{}" alt="{}">"#,
                escape(poster),
                escape(movie.title_label())
            ));
            "detail-info"
        }
        None => "detail-info wide",
    };

    html.push_str(&format!(
        r#"<div class="{}"><h4>{}</h4><div class="movie-meta">{}</div><p class="overview">{}</p><p><span class="details-label">Genres</span> <span class="details-value">{}</span></p></div></div><hr>"#,
        info_class,
        escape(movie.title_label()),
        escape(&movie.meta_line()),
        escape(movie.overview_text()),
        escape(&movie.genres_label())
    ));

    html.push_str(&format!(
        r#"<div class="providers"><div class="details-label">OTT Platforms (Region: {})</div>"#,
        escape(region)
    ));
    let labels = movie.provider_labels();
    if labels.is_empty() {
        html.push_str(&format!(r#"<p class="placeholder-text">{}</p>"#, NO_PROVIDERS));
    } else {
        html.push_str(r#"<div class="badges">"#);
        for label in labels {
            html.push_str(&format!(r#"<span class="badge badge-ott">{}</span>"#, escape(&label)));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");

    html
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn base_start(title: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <main>"#,
        escape(title)
    )
}

fn base_end() -> String {
    String::from(r#"</main></body></html>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::SEARCH_FAILED;

    fn item(id: i64, title: &str) -> SearchResultItem {
        SearchResultItem {
            tmdb_id: id,
            title: Some(title.to_string()),
            release_date: Some("2023-10-19".to_string()),
            rating: Some(7.14),
            overview: None,
            poster_url: None,
        }
    }

    #[test]
    fn empty_view_shows_both_placeholders() {
        let html = render_page(&FinderView::new(), "IN");
        assert!(html.contains("No results yet. Start by searching for a movie above."));
        assert!(html.contains("Select a movie from the left"));
        assert!(html.contains("region IN"));
        assert!(!html.contains("alert-danger"));
    }

    #[test]
    fn loading_disables_search_button() {
        let mut view = FinderView::new();
        view.begin_search("leo");
        let html = render_page(&view, "IN");
        assert!(html.contains(r#"type="submit" disabled>Searching...</button>"#));
        assert!(!html.contains("No results yet"));
    }

    #[test]
    fn results_mark_active_item_and_fallbacks() {
        let mut view = FinderView::new();
        view.results = vec![item(1, "Leo"), item(2, "Kantara")];
        view.selected_id = Some(2);
        let html = render_page(&view, "IN");
        assert!(html.contains(r#"<span class="badge">2</span>"#));
        assert!(html.contains(r#"<li class="movie-item active"><a href="/select/2">"#));
        assert!(html.contains(r#"<li class="movie-item"><a href="/select/1">"#));
        assert!(html.contains("⭐ 7.1"));
        assert!(html.contains("No description"));
        assert!(html.contains(PLACEHOLDER_POSTER));
    }

    #[test]
    fn details_render_providers_and_region() {
        let mut view = FinderView::new();
        view.selected_id = Some(5);
        view.selected = Some(
            serde_json::from_value(serde_json::json!({
                "tmdbId": 5,
                "title": "KGF",
                "providers": [{"providerName": "Prime Video", "type": "subscription"}]
            }))
            .unwrap(),
        );
        let html = render_page(&view, "IN");
        assert!(html.contains("OTT Platforms (Region: IN)"));
        assert!(html.contains("Prime Video • subscription"));
        assert!(html.contains("detail-info wide"));
        assert!(html.contains("No description available."));
    }

    #[test]
    fn details_without_providers_show_notice() {
        let mut view = FinderView::new();
        view.selected = Some(serde_json::from_value(serde_json::json!({ "tmdbId": 9 })).unwrap());
        let html = render_page(&view, "IN");
        assert!(html.contains(NO_PROVIDERS));
    }

    #[test]
    fn error_and_user_text_are_escaped() {
        let mut view = FinderView::new();
        view.query = "<script>".to_string();
        view.error = Some(SEARCH_FAILED.to_string());
        let html = render_page(&view, "IN");
        assert!(html.contains(SEARCH_FAILED));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains(r#"value="<script>""#));
    }
}
