use std::{
    io,
    sync::{Arc, OnceLock},
};

use application::{args, Args, Config, Console, Service};
use service::{
    command::{DeleteResidence, RestoreResidence},
    infra::Http,
    query::{ResidenceById, Residences},
    Carousel, Command as _, Form,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_thread_names(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    if start().await.is_err() {
        std::process::exit(1);
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().map_err(|e| {
        log::error!("failed to parse command line arguments: {e}");
    })?;

    let config = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
    })?;

    LOG_LEVEL
        .set(config.log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let http = Http::new(&config.remote.base_url).map_err(|e| {
        log::error!("failed to initialize `Http` remote: {e}");
    })?;
    let service = Service::new(config.service(), http);
    let mut console = Console::new(io::stdout(), &config.remote.base_url);

    let res = run(&service, command, &mut console).await;

    _ = console.notification(service.notifications()).map_err(|e| {
        log::error!("failed to render notification: {e}");
    });
    if let Some(e) = service.store().error() {
        log::debug!("last operation error: {e}");
    }
    res
}

/// Runs the provided [`args::Command`], rendering its outcome.
async fn run(
    service: &Service,
    command: args::Command,
    console: &mut Console<io::Stdout>,
) -> Result<(), ()> {
    let rendered = |res: io::Result<()>| {
        res.map_err(|e| log::error!("failed to render output: {e}"))
    };

    match command {
        args::Command::List { all } => {
            _ = service.execute(Residences).await.map_err(|e| {
                log::error!("failed to list residences: {e}");
            })?;
            let residences = service.store().residences();
            let carousel = Carousel::new(Arc::clone(&residences));
            rendered(console.list(&residences, &carousel, all))
        }
        args::Command::Show { id } => {
            let residence =
                service.execute(ResidenceById(id)).await.map_err(|e| {
                    log::error!("failed to fetch `Residence({id})`: {e}");
                })?;
            rendered(console.residence(&residence))
        }
        args::Command::Create(fields) => {
            let mut form = Form::default();
            form.open_create();
            submit(service, &mut form, &fields, console).await
        }
        args::Command::Update { id, fields } => {
            let residence =
                service.execute(ResidenceById(id)).await.map_err(|e| {
                    log::error!("failed to fetch `Residence({id})`: {e}");
                })?;
            let mut form = Form::default();
            form.open_update(&residence);
            submit(service, &mut form, &fields, console).await
        }
        args::Command::Delete { id } => {
            service.execute(DeleteResidence { id }).await.map_err(|e| {
                log::error!("failed to delete `Residence({id})`: {e}");
            })
        }
        args::Command::Restore { id } => {
            let residence = service
                .execute(RestoreResidence { id })
                .await
                .map_err(|e| {
                    log::error!("failed to restore `Residence({id})`: {e}");
                })?;
            rendered(console.residence(&residence))
        }
    }
}

/// Fills the provided [`Form`] with the given [`args::Fields`] and submits
/// it.
async fn submit(
    service: &Service,
    form: &mut Form,
    fields: &args::Fields,
    console: &mut Console<io::Stdout>,
) -> Result<(), ()> {
    if let Some(draft) = form.draft_mut() {
        fields.apply(draft);
    }

    let attached = form.attach(&fields.image_files).await;
    if attached < fields.image_files.len() {
        log::warn!(
            "{} of {} image files attached",
            attached,
            fields.image_files.len(),
        );
    }

    if form.submit(service).await {
        return Ok(());
    }

    let errors = form.errors();
    if !errors.is_empty() {
        log::error!("residence is invalid: {errors}");
        console.form_errors(errors).map_err(|e| {
            log::error!("failed to render output: {e}");
        })?;
    }
    Err(())
}
