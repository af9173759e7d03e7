use std::collections::VecDeque;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use anyhow::Context as _;
use async_trait::async_trait;
use clap::Parser;
use futures_core::Stream;
use thiserror::Error;

use mvikit::config::Config;
use mvikit::features::{PagerFeature, PagerIntent, PagerState};
use mvikit::publisher::forward_stream;
use mvikit::{
    AsyncActionReducer, EventReducer, IntentReducer, Observer, PassthroughSubject, Path, Pipeline,
    Publisher, ReducibleState, StateContainer, SubscriptionRegistry,
};

#[derive(Debug, Parser)]
#[command(name = "mvikit", about = "Run a small wired feature graph and print what it observes")]
struct Cli {
    /// Config file (default: the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Counter increments to run
    #[arg(long)]
    steps: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct CounterState {
    count: u32,
}

#[derive(Debug)]
enum CounterIntent {
    Increment,
}

#[derive(Debug, Clone, PartialEq)]
enum CounterEvent {
    Reached(u32),
}

struct CounterFeature {
    container: StateContainer<CounterState>,
    events: PassthroughSubject<CounterEvent>,
    target: u32,
}

impl ReducibleState for CounterFeature {
    type State = CounterState;

    fn container(&self) -> &StateContainer<CounterState> {
        &self.container
    }
}

impl IntentReducer for CounterFeature {
    type Intent = CounterIntent;

    fn reduce_intent(&self, intent: CounterIntent) {
        match intent {
            CounterIntent::Increment => {
                self.apply_update(|state| state.count += 1);
                if self.state().count == self.target {
                    self.publish(CounterEvent::Reached(self.target));
                }
            }
        }
    }
}

impl EventReducer for CounterFeature {
    type Event = CounterEvent;

    fn publisher(&self) -> &PassthroughSubject<CounterEvent> {
        &self.events
    }
}

#[derive(Debug, Clone, Error)]
enum SearchError {
    #[error("query is empty")]
    EmptyQuery,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct SearchState {
    query: String,
    hits: Vec<&'static str>,
}

struct SearchFeature {
    container: StateContainer<SearchState>,
    catalog: Vec<&'static str>,
}

impl ReducibleState for SearchFeature {
    type State = SearchState;

    fn container(&self) -> &StateContainer<SearchState> {
        &self.container
    }
}

#[async_trait]
impl AsyncActionReducer for SearchFeature {
    type Action = String;
    type Reaction = usize;
    type Error = SearchError;

    async fn reduce_action(&self, query: String) -> Result<usize, SearchError> {
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        self.apply_update(|state| state.query = query.clone());
        tokio::time::sleep(Duration::from_millis(5)).await;

        let hits: Vec<_> = self
            .catalog
            .iter()
            .copied()
            .filter(|item| item.contains(query.as_str()))
            .collect();
        let found = hits.len();
        self.apply_update(|state| state.hits = hits);
        Ok(found)
    }
}

/// Queries typed by a pretend user.
struct Queries {
    pending: VecDeque<Result<String, SearchError>>,
}

impl Stream for Queries {
    type Item = Result<String, SearchError>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.pending.pop_front())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    mvikit::logging::init_tracing(&config.logging).context("initializing logging")?;

    let steps = cli.steps.unwrap_or(config.demo.steps);
    let items_per_page = config.demo.items_per_page;
    tracing::info!(steps, items_per_page, "Starting demo");

    let registry = SubscriptionRegistry::new();

    let counter = Arc::new(CounterFeature {
        container: StateContainer::new(CounterState::default()),
        events: PassthroughSubject::new(),
        target: steps,
    });
    let pager = Arc::new(PagerFeature::new(PagerState::new(1, 100, items_per_page)));

    registry.store(
        counter
            .state_publisher()
            .sink(|state: CounterState| println!("counter: {}", state.count)),
    );
    registry.store(
        counter
            .publisher()
            .sink(|event: CounterEvent| match event {
                CounterEvent::Reached(count) => println!("event:   reached {count}"),
            }),
    );
    registry.store(
        pager
            .state_publisher()
            .changes()
            .sink(|state: PagerState| println!("pager:   page {}", state.current_page)),
    );

    // Every step scrolls one full page further.
    registry.bind(
        &counter.state_publisher().changes(),
        Pipeline::extract(
            Path::field(move |state: &CounterState| state.count as usize * items_per_page),
            PagerIntent::UpdateBy,
        ),
        pager.intents(),
    );

    for _ in 0..steps {
        counter.intent(CounterIntent::Increment);
    }

    let search = Arc::new(SearchFeature {
        container: StateContainer::new(SearchState::default()),
        catalog: vec!["apple", "apricot", "banana", "blueberry", "cherry"],
    });
    registry.store(search.state_publisher().changes().sink(|state: SearchState| {
        println!("search:  {:?} -> {:?}", state.query, state.hits)
    }));

    let queries = PassthroughSubject::<String, SearchError>::new();
    registry.bind(
        &queries,
        Pipeline::new(|query: String| query).on_fail(|error: SearchError| {
            tracing::warn!(%error, "Query stream failed");
            None
        }),
        search.detached_actions(),
    );

    let typed = Queries {
        pending: VecDeque::from([
            Ok("ap".to_string()),
            Ok(String::new()),
            Ok("berry".to_string()),
        ]),
    };
    forward_stream(typed, &queries)?.join().await?;

    // Detached searches run on their own tasks; give them time to land.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let found = search.action("ch".to_string()).await?;
    println!("awaited: {found} hit(s)");

    registry.teardown();
    tracing::info!("Demo finished");
    Ok(())
}
