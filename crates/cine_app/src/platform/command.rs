use cine_core::{Collection, Listing, MovieId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Browse(Listing),
    Page(u32),
    NextPage,
    PreviousPage,
    Retry,
    /// Re-run the n-th entry (1-based) of the search history.
    Again(usize),
    ToggleFavorite(MovieId),
    RemoveFavorite(MovieId),
    Details(MovieId),
    ShowFavorites,
    ShowHistory,
    ShowGenres,
    Clear,
    Refresh,
    Help,
    Quit,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => {
            if rest.is_empty() {
                return Err("usage: search <title>".to_string());
            }
            Command::Search(rest.to_string())
        }
        "popular" => Command::Browse(Listing::Collection(Collection::Popular)),
        "top" | "top-rated" => Command::Browse(Listing::Collection(Collection::TopRated)),
        "upcoming" => Command::Browse(Listing::Collection(Collection::Upcoming)),
        "discover" => Command::Browse(Listing::Discover { genre: None }),
        "genre" => Command::Browse(Listing::Discover {
            genre: Some(number(rest, "genre <id>")?),
        }),
        "page" | "p" => Command::Page(number(rest, "page <n>")?),
        "next" | "n" => Command::NextPage,
        "prev" | "previous" => Command::PreviousPage,
        "retry" | "r" => Command::Retry,
        "again" => Command::Again(number(rest, "again <n>")?),
        "fav" | "f" => Command::ToggleFavorite(number(rest, "fav <movie id>")?),
        "unfav" => Command::RemoveFavorite(number(rest, "unfav <movie id>")?),
        "details" | "d" => Command::Details(number(rest, "details <movie id>")?),
        "favorites" | "favs" => Command::ShowFavorites,
        "history" | "h" => Command::ShowHistory,
        "genres" => Command::ShowGenres,
        "clear" => Command::Clear,
        "refresh" => Command::Refresh,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(Some(command))
}

fn number<T: std::str::FromStr>(text: &str, usage: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("usage: {usage}"))
}

pub const HELP: &str = "\
Commands:
  search <title>     search the catalog (alias: s)
  popular | top | upcoming
                     browse a curated collection
  discover | genre <id>
                     browse by popularity, optionally within a genre
  page <n> | next | prev
  retry              repeat the last failed request
  again <n>          repeat the n-th recent search
  details <id>       show a movie's details (alias: d)
  fav <id>           toggle a favorite; unfav <id> removes it
  favorites | history | genres
  clear              reset the results
  refresh            drop cached responses
  quit
";
