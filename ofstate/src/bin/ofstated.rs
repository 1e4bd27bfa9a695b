//! Binary entry point. Wires up logging, daemonization, and a
//! `StateManager` built from the in-memory reference collaborators — the
//! wire codec and real forwarding/port backends are external collaborators
//! this binary doesn't implement (see the crate docs).

use clap::Parser;
use daemon::Daemonize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(version, about = "OpenFlow state manager agent")]
struct Args {
    #[clap(flatten)]
    daemonize: Daemonize,

    /// Verbosity, e.g. "ofstate=debug,info"
    #[clap(long, default_value = "info")]
    log_filter: String,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Safety: logging is initialized and nothing else has spawned threads
    // yet, satisfying `Daemonize::start`'s single-threaded requirement.
    let (daemonizing, _cleanup) = unsafe { args.daemonize.start() };

    let mut state_manager = ofstate::StateManager::new(
        ofstate::InMemoryFlowTable::new(),
        ofstate::SimForwarding::new(),
        ofstate::SimPort::new(),
        ofstate::RecordingConnection::new(),
        ofstate::clock::SystemClock::new(),
    );

    tracing::info!("ofstated ready");
    daemonizing.finish();

    // The connection manager that would feed decoded messages into
    // `ofstate::handle` in a real deployment is an external collaborator;
    // this binary's job ends at standing up the state manager.
    let _ = &mut state_manager;
}
