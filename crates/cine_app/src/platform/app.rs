use std::io::{self, BufRead, Write as _};
use std::path::Path;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use cine_core::{AppState, Listing, Movie, MovieId, Msg, Store};
use cine_engine::{CatalogClient, EngineHandle, FileSlotStore, SlotStore};
use cine_logging::{cine_info, cine_warn};

use super::command::{self, Command, HELP};
use super::config::{self, AppConfig, API_KEY_ENV, CONFIG_FILENAME};
use super::effects::{map_movie, EffectRunner, Inbound};
use super::{logging, persistence, render};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub fn run_app() -> anyhow::Result<()> {
    let config = match config::load(Path::new(CONFIG_FILENAME)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: {err:#}; using default settings");
            AppConfig::default()
        }
    }
    .with_api_key_override(std::env::var(API_KEY_ENV).ok());

    logging::initialize(config.log_destination, config.log_level());
    cine_info!("Starting CineDiscover against {}", config.base_url);
    if config.api_key.is_empty() {
        cine_warn!("No API key configured");
        eprintln!("warning: no API key set; export {API_KEY_ENV} or add api_key to {CONFIG_FILENAME}");
    }

    let client =
        CatalogClient::new(config.catalog_settings()).context("building the catalog client")?;
    let engine = EngineHandle::new(client).context("starting the catalog engine")?;
    let storage = FileSlotStore::new(config.storage_dir.clone());

    let mut store = Store::new(AppState::new());
    store.dispatch(Msg::LoadFavorites(persistence::load_favorites(&storage)));
    store.dispatch(Msg::LoadSearchHistory(persistence::load_search_history(
        &storage,
    )));
    store.subscribe(|view| {
        print!("{}", render::render_view(view));
        let _ = io::stdout().flush();
    });

    let mut session = Session {
        store,
        runner: EffectRunner::new(engine, storage),
        last_details: None,
        image_base_url: config.image_base_url.clone(),
    };
    println!("{HELP}");
    session.dispatch(Msg::BrowseRequested(Listing::default()));

    let lines = spawn_stdin_reader().context("starting the input reader")?;
    let mut input_closed = false;
    loop {
        if let Some(inbound) = session.runner.next_inbound(POLL_INTERVAL) {
            session.handle_inbound(inbound);
            continue;
        }
        if input_closed {
            if !session.is_busy() {
                break;
            }
            continue;
        }
        match lines.try_recv() {
            Ok(line) => {
                if session.handle_line(&line) == Flow::Quit {
                    break;
                }
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => input_closed = true,
        }
    }

    session.runner.shutdown();
    cine_info!("CineDiscover stopped");
    Ok(())
}

fn spawn_stdin_reader() -> io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("cine-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct Session<S: SlotStore> {
    store: Store,
    runner: EffectRunner<S>,
    /// Most recently shown details, so a movie opened by id can be favorited.
    last_details: Option<Movie>,
    image_base_url: String,
}

impl<S: SlotStore> Session<S> {
    fn dispatch(&mut self, msg: Msg) {
        let effects = self.store.dispatch(msg);
        self.runner.run(effects);
    }

    fn is_busy(&self) -> bool {
        self.store.state().in_flight_request().is_some() || self.runner.has_pending_local()
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match command::parse(line) {
            Ok(Some(command)) => self.handle_command(command),
            Ok(None) => Flow::Continue,
            Err(message) => {
                println!("{message}");
                Flow::Continue
            }
        }
    }

    fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Search(query) => self.dispatch(Msg::SearchSubmitted(query)),
            Command::Browse(listing) => self.dispatch(Msg::BrowseRequested(listing)),
            Command::Page(page) => self.dispatch(Msg::PageRequested(page)),
            Command::NextPage => {
                let next = self.store.state().current_page().saturating_add(1);
                self.dispatch(Msg::PageRequested(next));
            }
            Command::PreviousPage => {
                let current = self.store.state().current_page();
                if current > 1 {
                    self.dispatch(Msg::PageRequested(current - 1));
                } else {
                    println!("Already on the first page.");
                }
            }
            Command::Retry => self.dispatch(Msg::RetryRequested),
            Command::Again(position) => {
                let query = position
                    .checked_sub(1)
                    .and_then(|index| self.store.state().search_history().get(index))
                    .cloned();
                match query {
                    Some(query) => self.dispatch(Msg::SearchSubmitted(query)),
                    None => println!("No recent search #{position}."),
                }
            }
            Command::ToggleFavorite(id) => self.toggle_favorite(id),
            Command::RemoveFavorite(id) => {
                if self.store.state().is_favorite(id) {
                    self.dispatch(Msg::RemoveFavorite(id));
                    println!("Removed {id} from favorites.");
                } else {
                    println!("Movie {id} is not a favorite.");
                }
            }
            Command::Details(id) => {
                println!("Loading details for {id}...");
                self.runner.request_details(id);
            }
            Command::ShowFavorites => {
                print!("{}", render::render_favorites(self.store.state().favorites()));
            }
            Command::ShowHistory => {
                print!("{}", render::render_history(self.store.state().search_history()));
            }
            Command::ShowGenres => self.runner.request_genres(),
            Command::Clear => self.dispatch(Msg::ClearResults),
            Command::Refresh => {
                self.runner.clear_cache();
                println!("Cached responses dropped.");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn toggle_favorite(&mut self, id: MovieId) {
        let state = self.store.state();
        let movie = state.find_movie(id).cloned().or_else(|| {
            self.last_details
                .as_ref()
                .filter(|movie| movie.id == id)
                .cloned()
        });
        let Some(movie) = movie else {
            println!("Movie {id} is not on screen; open it with `details {id}` first.");
            return;
        };
        let was_favorite = state.is_favorite(id);
        let title = movie.title.clone();
        self.dispatch(Msg::FavoriteToggled(movie));
        if was_favorite {
            println!("Removed \"{title}\" from favorites.");
        } else {
            println!("Added \"{title}\" to favorites.");
        }
    }

    fn handle_inbound(&mut self, inbound: Inbound) {
        match inbound {
            Inbound::Msg(msg) => self.dispatch(msg),
            Inbound::Details(Ok(details)) => {
                let favorite = self.store.state().is_favorite(details.movie.id);
                print!(
                    "{}",
                    render::render_details(&details, &self.image_base_url, favorite)
                );
                self.last_details = Some(map_movie(details.movie));
            }
            Inbound::Details(Err(err)) => {
                cine_warn!("Details request failed: {}", err);
                println!("Failed to load movie details: {err}");
            }
            Inbound::Genres(Ok(genres)) => print!("{}", render::render_genres(&genres)),
            Inbound::Genres(Err(err)) => {
                cine_warn!("Genre request failed: {}", err);
                println!("Failed to load genres: {err}");
            }
        }
        let _ = io::stdout().flush();
    }
}
