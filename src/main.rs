use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;

use pushkind_store::config::ServerConfig;
use pushkind_store::db::{establish_connection_pool, run_migrations};
use pushkind_store::repository::DieselRepository;
use pushkind_store::routes::{build_tera, configure, configure_assets};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let secret_key = match &config.secret {
        Some(secret) if secret.len() >= 32 => Key::derive_from(secret.as_bytes()),
        Some(_) => {
            log::error!("SECRET_KEY must be at least 32 bytes long");
            std::process::exit(1);
        }
        None => {
            log::warn!("SECRET_KEY is not set, sessions will not survive a restart");
            Key::generate()
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => match run_migrations(&mut conn) {
            Ok(0) => {}
            Ok(applied) => log::info!("Applied {applied} pending migration(s)"),
            Err(e) => {
                log::error!("Failed to run migrations: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            log::error!("Failed to get a database connection: {e}");
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::create_dir_all(&config.upload_dir) {
        log::error!(
            "Failed to create upload directory {}: {e}",
            config.upload_dir.display()
        );
        std::process::exit(1);
    }

    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match build_tera(&config.templates) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    let bind_address = (config.address.clone(), config.port);
    let cookie_domain = config.cookie_domain();
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(cookie_domain.clone())
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(|cfg| configure_assets(cfg, &config.upload_dir))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
