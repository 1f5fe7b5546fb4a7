use std::{future::IntoFuture, process, sync::Arc};

use nazim_site::{
    application::{
        access::Principal,
        admin::{
            AdminAuditService, AdminEventService, AdminInboxService, AdminSeoService,
            AdminSettingsService,
        },
        error::AppError,
        public_site::{PublicSiteRepos, PublicSiteService},
        repos::{
            AnnouncementsRepo, AuditRepo, CatalogRepo, ContentSeoWriteRepo, EventsRepo,
            EventsWriteRepo, FatwasRepo, HealthRepo, InboxRepo, MediaRepo, MenusRepo, PagesRepo,
            PostsRepo, SettingsRepo,
        },
        sitemap::SitemapService,
    },
    config,
    domain::{
        error::DomainError,
        seo::{SeoQuery, SeoStatusFilter, SeoTypeFilter},
    },
    infra::{
        cache::ResponseCache,
        db::PostgresRepositories,
        error::InfraError,
        http::{self, AdminState, PublicState, SubmissionRateLimiter},
        telemetry,
    },
};
use tokio::{sync::watch, try_join};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

const CLI_ACTOR: &str = "cli";

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Migrate(_) => run_migrate(settings).await,
        config::Command::SeoReport(args) => run_seo_report(settings, args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    PostgresRepositories::run_migrations(repositories.pool())
        .await
        .map_err(|err| AppError::from(InfraError::migration(err.to_string())))?;

    let (public_state, admin_state) = build_states(&repositories, &settings);
    serve_http(&settings, public_state, admin_state).await
}

async fn run_migrate(settings: config::Settings) -> Result<(), AppError> {
    let repositories = init_repositories(&settings).await?;
    PostgresRepositories::run_migrations(repositories.pool())
        .await
        .map_err(|err| AppError::from(InfraError::migration(err.to_string())))?;

    info!(target = "nazim_site::migrate", "migrations applied");
    Ok(())
}

async fn run_seo_report(
    settings: config::Settings,
    args: config::SeoReportArgs,
) -> Result<(), AppError> {
    let item_type = SeoTypeFilter::parse(&args.item_type)
        .ok_or_else(|| DomainError::validation("type", "expected all, page or post"))?;
    let status = SeoStatusFilter::parse(&args.status)
        .ok_or_else(|| DomainError::validation("status", "expected all, needs or complete"))?;
    let query = SeoQuery {
        search: args.search.unwrap_or_default(),
        item_type,
        status,
    };

    let repositories = init_repositories(&settings).await?;
    let pages: Arc<dyn PagesRepo> = repositories.clone();
    let posts: Arc<dyn PostsRepo> = repositories.clone();
    let writer: Arc<dyn ContentSeoWriteRepo> = repositories.clone();
    let audit_repo: Arc<dyn AuditRepo> = repositories.clone();
    let report = AdminSeoService::new(pages, posts, writer, AdminAuditService::new(audit_repo))
        .audit(&Principal::operator(CLI_ACTOR), &query)
        .await?;

    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| AppError::unexpected(format!("failed to encode report: {err}")))?;
    println!("{json}");
    Ok(())
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    let database_url = settings
        .database
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("database url is not configured"))
        .map_err(AppError::from)?;

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

    Ok(Arc::new(PostgresRepositories::new(pool)))
}

fn build_states(
    repositories: &Arc<PostgresRepositories>,
    settings: &config::Settings,
) -> (PublicState, AdminState) {
    let pages_repo: Arc<dyn PagesRepo> = repositories.clone();
    let posts_repo: Arc<dyn PostsRepo> = repositories.clone();
    let announcements_repo: Arc<dyn AnnouncementsRepo> = repositories.clone();
    let events_repo: Arc<dyn EventsRepo> = repositories.clone();
    let events_write_repo: Arc<dyn EventsWriteRepo> = repositories.clone();
    let catalog_repo: Arc<dyn CatalogRepo> = repositories.clone();
    let media_repo: Arc<dyn MediaRepo> = repositories.clone();
    let fatwas_repo: Arc<dyn FatwasRepo> = repositories.clone();
    let inbox_repo: Arc<dyn InboxRepo> = repositories.clone();
    let menus_repo: Arc<dyn MenusRepo> = repositories.clone();
    let seo_write_repo: Arc<dyn ContentSeoWriteRepo> = repositories.clone();
    let settings_repo: Arc<dyn SettingsRepo> = repositories.clone();
    let audit_repo: Arc<dyn AuditRepo> = repositories.clone();
    let health_repo: Arc<dyn HealthRepo> = repositories.clone();

    let cache = ResponseCache::new(settings.cache.public_ttl, settings.cache.max_entries);
    let limiter = SubmissionRateLimiter::new(
        settings.rate_limit.window,
        settings.rate_limit.max_requests.get(),
    );

    let site = Arc::new(PublicSiteService::new(PublicSiteRepos {
        pages: pages_repo.clone(),
        posts: posts_repo.clone(),
        announcements: announcements_repo.clone(),
        events: events_repo.clone(),
        catalog: catalog_repo,
        media: media_repo,
        fatwas: fatwas_repo,
        inbox: inbox_repo.clone(),
        menus: menus_repo,
        settings: settings_repo.clone(),
    }));
    let sitemap = Arc::new(SitemapService::new(
        pages_repo.clone(),
        posts_repo.clone(),
        announcements_repo,
        settings_repo.clone(),
    ));

    let audit = AdminAuditService::new(audit_repo);
    let admin_state = AdminState {
        events: Arc::new(AdminEventService::new(
            events_repo,
            events_write_repo,
            audit.clone(),
        )),
        inbox: Arc::new(AdminInboxService::new(inbox_repo, audit.clone())),
        seo: Arc::new(AdminSeoService::new(
            pages_repo,
            posts_repo,
            seo_write_repo,
            audit.clone(),
        )),
        settings: Arc::new(AdminSettingsService::new(settings_repo, audit.clone())),
        audit: Arc::new(audit),
        health: health_repo.clone(),
        cache: cache.clone(),
    };

    let public_state = PublicState {
        site,
        sitemap,
        health: health_repo,
        cache,
        limiter,
    };

    (public_state, admin_state)
}

async fn serve_http(
    settings: &config::Settings,
    public_state: PublicState,
    admin_state: AdminState,
) -> Result<(), AppError> {
    let public_router = http::build_public_router(public_state);
    let admin_router = http::build_admin_router(admin_state);

    let public_addr = settings.server.public_addr;
    let admin_addr = settings.server.admin_addr;
    let public_listener = tokio::net::TcpListener::bind(public_addr)
        .await
        .map_err(|source| {
            AppError::from(InfraError::Bind {
                address: public_addr,
                source,
            })
        })?;
    let admin_listener = tokio::net::TcpListener::bind(admin_addr)
        .await
        .map_err(|source| {
            AppError::from(InfraError::Bind {
                address: admin_addr,
                source,
            })
        })?;

    info!(
        target = "nazim_site::serve",
        public = %public_addr,
        admin = %admin_addr,
        "listening"
    );

    let (stop_tx, stop_rx) = watch::channel(false);
    let public_server = axum::serve(public_listener, public_router.into_make_service())
        .with_graceful_shutdown(stopped(stop_rx.clone()))
        .into_future();
    let admin_server = axum::serve(admin_listener, admin_router.into_make_service())
        .with_graceful_shutdown(stopped(stop_rx))
        .into_future();

    let servers = async { try_join!(public_server, admin_server) };
    tokio::pin!(servers);

    let result = tokio::select! {
        result = &mut servers => result,
        () = shutdown_signal() => {
            info!(target = "nazim_site::serve", "shutdown requested, draining connections");
            let _ = stop_tx.send(true);
            match tokio::time::timeout(settings.server.graceful_shutdown, &mut servers).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        target = "nazim_site::serve",
                        timeout_secs = settings.server.graceful_shutdown.as_secs(),
                        "graceful shutdown timed out"
                    );
                    return Ok(());
                }
            }
        }
    };

    result
        .map(|_| ())
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))
}

async fn stopped(mut stop: watch::Receiver<bool>) {
    let _ = stop.wait_for(|stopped| *stopped).await;
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(
            target = "nazim_site::serve",
            error = %err,
            "failed to listen for shutdown signal"
        );
        std::future::pending::<()>().await;
    }
}
