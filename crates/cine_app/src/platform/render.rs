use std::fmt::Write as _;

use chrono::{Datelike, NaiveDate};
use cine_core::{AppViewModel, Movie, PageSlot};
use cine_engine::{image_url_with_base, Genre, ImageKind, ImageSize, MovieDetails, ReleaseStatus};

pub fn render_view(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.query.is_empty() {
        let _ = writeln!(out, "== {} ==", capitalize(&view.listing.to_string()));
    } else {
        let _ = writeln!(
            out,
            "== Results for \"{}\" ({} results) ==",
            view.query,
            group_thousands(view.total_results)
        );
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error}");
        if view.can_retry {
            let _ = writeln!(out, "  type `retry` to try again");
        }
        return out;
    }
    if view.is_loading {
        let _ = writeln!(out, "Loading...");
        return out;
    }
    if view.is_empty_search() {
        let _ = writeln!(out, "No movies found. Try another title.");
        return out;
    }

    for movie in &view.results {
        let favorite = view.favorites.iter().any(|fav| fav.id == movie.id);
        let _ = writeln!(out, "{}", movie_line(movie, favorite));
    }
    if !view.pages.is_empty() {
        let _ = writeln!(out, "{}", pager_line(&view.pages, view.current_page));
    }
    out
}

pub fn render_details(details: &MovieDetails, image_base: &str, is_favorite: bool) -> String {
    let movie = &details.movie;
    let mut out = String::new();
    let heart = if is_favorite { " [favorite]" } else { "" };
    let _ = writeln!(
        out,
        "{} ({}){heart}",
        movie.title,
        release_year(movie.known_release_date())
    );
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "  \"{tagline}\"");
    }
    let _ = writeln!(
        out,
        "  Rating {} ({} votes) | {} | {}",
        format_rating(movie.vote_average),
        movie.vote_count,
        format_runtime(details.runtime),
        status_label(details.status)
    );
    if !details.genres.is_empty() {
        let names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        let _ = writeln!(out, "  Genres: {}", names.join(", "));
    }
    let directors: Vec<&str> = details
        .credits
        .crew_with_job("Director")
        .map(|member| member.name.as_str())
        .collect();
    if !directors.is_empty() {
        let _ = writeln!(out, "  Directed by {}", directors.join(", "));
    }
    if !details.credits.cast.is_empty() {
        let cast: Vec<String> = details
            .credits
            .cast
            .iter()
            .take(5)
            .map(|member| format!("{} as {}", member.name, member.character))
            .collect();
        let _ = writeln!(out, "  Cast: {}", cast.join("; "));
    }
    let _ = writeln!(
        out,
        "  Budget {} | Revenue {}",
        format_money(details.budget),
        format_money(details.revenue)
    );
    if !movie.overview.is_empty() {
        let _ = writeln!(out, "  {}", movie.overview);
    }
    if let Some(poster) = image_url_with_base(
        image_base,
        movie.poster_path.as_deref(),
        ImageSize::Large,
        ImageKind::Poster,
    ) {
        let _ = writeln!(out, "  Poster: {poster}");
    }
    if let Some(imdb) = details.imdb_id.as_deref().filter(|id| !id.is_empty()) {
        let _ = writeln!(out, "  IMDb: https://www.imdb.com/title/{imdb}");
    }
    if let Some(trailer) = details
        .videos
        .results
        .iter()
        .find(|video| video.site == "YouTube" && video.kind == "Trailer")
    {
        let _ = writeln!(out, "  Trailer: https://www.youtube.com/watch?v={}", trailer.key);
    }
    if let Some(similar) = details.similar.as_ref().filter(|page| !page.results.is_empty()) {
        let titles: Vec<&str> = similar.results.iter().take(5).map(|m| m.title.as_str()).collect();
        let _ = writeln!(out, "  Similar: {}", titles.join(", "));
    }
    out
}

pub fn render_favorites(favorites: &[Movie]) -> String {
    if favorites.is_empty() {
        return "No favorites yet. Use `fav <id>` to add one.\n".to_string();
    }
    let mut out = format!(
        "{} favorite movie{}\n",
        favorites.len(),
        if favorites.len() == 1 { "" } else { "s" }
    );
    for movie in favorites {
        let _ = writeln!(out, "{}", movie_line(movie, true));
    }
    out
}

pub fn render_history(history: &[String]) -> String {
    if history.is_empty() {
        return "No recent searches.\n".to_string();
    }
    let mut out = String::new();
    for (index, query) in history.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {query}", index + 1);
    }
    out
}

pub fn render_genres(genres: &[Genre]) -> String {
    let mut out = String::new();
    for genre in genres {
        let _ = writeln!(out, "{:>6}  {}", genre.id, genre.name);
    }
    out
}

fn movie_line(movie: &Movie, favorite: bool) -> String {
    format!(
        "{:>8} {} {} ({}) {}",
        movie.id,
        if favorite { '*' } else { ' ' },
        movie.title,
        release_year(movie.release_date.as_deref()),
        format_rating(movie.vote_average)
    )
}

fn pager_line(pages: &[PageSlot], current: u32) -> String {
    let parts: Vec<String> = pages
        .iter()
        .map(|slot| match slot {
            PageSlot::Page(page) if *page == current => format!("[{page}]"),
            PageSlot::Page(page) => page.to_string(),
            PageSlot::Gap => "...".to_string(),
        })
        .collect();
    format!("Pages: {}", parts.join(" "))
}

/// Year of an ISO release date, or "TBA".
pub fn release_year(date: Option<&str>) -> String {
    date.and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .map(|date| date.year().to_string())
        .unwrap_or_else(|| "TBA".to_string())
}

pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(minutes) if minutes > 0 => format!("{}h {}m", minutes / 60, minutes % 60),
        _ => "Unknown".to_string(),
    }
}

pub fn format_rating(average: f64) -> String {
    format!("{:.1}", (average * 10.0).round() / 10.0)
}

pub fn format_money(amount: u64) -> String {
    if amount == 0 {
        return "Unknown".to_string();
    }
    format!("${}", group_thousands(amount))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn status_label(status: ReleaseStatus) -> &'static str {
    match status {
        ReleaseStatus::Rumored => "Rumored",
        ReleaseStatus::Planned => "Planned",
        ReleaseStatus::InProduction => "In Production",
        ReleaseStatus::PostProduction => "Post Production",
        ReleaseStatus::Released => "Released",
        ReleaseStatus::Canceled => "Canceled",
        ReleaseStatus::Unknown => "Status unknown",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
