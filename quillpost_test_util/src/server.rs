use std::{
    net::{Ipv4Addr, SocketAddr},
    str::FromStr,
};

use actix_web::{dev::ServerHandle, middleware::NormalizePath, web, App, HttpServer};
use quillpost::{configure_application, state::ApplicationStateInner};
use quillpost_configuration::DEFAULT_JSON_BODY_LIMIT_BYTES;
use quillpost_database::{InMemoryDatabase, PostgresDatabase, MIGRATOR};
use reqwest::{header, Client, ClientBuilder, Method, RequestBuilder};
use serde::Serialize;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Connection,
    PgConnection,
    PgPool,
};
use tracing_actix_web::TracingLogger;
use uuid::Uuid;

use crate::TestResponse;

pub const TEST_USER_AGENT: &str = concat!("quillpost-e2e-test/", env!("CARGO_PKG_VERSION"));

/// Connection URL of a PostgreSQL server the Postgres-backed tests may create
/// and drop databases on. Those tests are skipped when it is not set.
pub const TEST_DATABASE_URL_ENV_VAR_NAME: &str = "QUILLPOST_TEST_DATABASE_URL";



/// A database created (and migrated) for a single test, dropped again on [`TestServer::stop`].
struct TemporaryPostgresDatabase {
    server_connect_options: PgConnectOptions,

    database_name: String,

    pool: PgPool,
}

impl TemporaryPostgresDatabase {
    async fn create(database_url: &str) -> Self {
        let server_connect_options = PgConnectOptions::from_str(database_url)
            .unwrap_or_else(|_| panic!("{} is not a valid PostgreSQL URL", TEST_DATABASE_URL_ENV_VAR_NAME));

        let database_name = format!("quillpost_e2e_{}", Uuid::new_v4().simple());


        let mut server_connection = PgConnection::connect_with(&server_connect_options)
            .await
            .expect("failed to connect to the test PostgreSQL server");

        sqlx::query(&format!("CREATE DATABASE {}", database_name))
            .execute(&mut server_connection)
            .await
            .expect("failed to create test database");

        server_connection
            .close()
            .await
            .expect("failed to close connection to the test PostgreSQL server");


        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect_with(server_connect_options.clone().database(&database_name))
            .await
            .expect("failed to connect to the test database");

        MIGRATOR
            .run(&pool)
            .await
            .expect("failed to apply migrations to the test database");

        Self {
            server_connect_options,
            database_name,
            pool,
        }
    }

    async fn drop_database(self) {
        self.pool.close().await;

        let mut server_connection = PgConnection::connect_with(&self.server_connect_options)
            .await
            .expect("failed to connect to the test PostgreSQL server");

        sqlx::query(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            self.database_name
        ))
        .execute(&mut server_connection)
        .await
        .expect("failed to drop test database");

        server_connection
            .close()
            .await
            .expect("failed to close connection to the test PostgreSQL server");
    }
}



/// A running quillpost server with a fresh, empty database.
///
/// Must be started from within an actix runtime (i.e. from an `#[actix_web::test]`).
pub struct TestServer {
    base_url: String,

    client: Client,

    server_handle: ServerHandle,

    postgres_database: Option<TemporaryPostgresDatabase>,
}

impl TestServer {
    /// Starts a server backed by an in-memory database.
    pub async fn start() -> Self {
        Self::start_with_json_body_limit(DEFAULT_JSON_BODY_LIMIT_BYTES).await
    }

    pub async fn start_with_json_body_limit(json_body_limit_bytes: usize) -> Self {
        let state = ApplicationStateInner::from_database(InMemoryDatabase::new());

        Self::start_with_state(state, json_body_limit_bytes, None)
    }

    /// Starts a server backed by a brand new PostgreSQL database on the server
    /// named by [`TEST_DATABASE_URL_ENV_VAR_NAME`].
    ///
    /// Returns `None` when that variable is not set.
    pub async fn start_with_postgres() -> Option<Self> {
        let Ok(database_url) = std::env::var(TEST_DATABASE_URL_ENV_VAR_NAME) else {
            eprintln!(
                "{} is not set, skipping PostgreSQL-backed test.",
                TEST_DATABASE_URL_ENV_VAR_NAME
            );
            return None;
        };

        let database = TemporaryPostgresDatabase::create(&database_url).await;
        let state =
            ApplicationStateInner::from_database(PostgresDatabase::new(database.pool.clone()));

        Some(Self::start_with_state(
            state,
            DEFAULT_JSON_BODY_LIMIT_BYTES,
            Some(database),
        ))
    }

    fn start_with_state(
        state: ApplicationStateInner,
        json_body_limit_bytes: usize,
        postgres_database: Option<TemporaryPostgresDatabase>,
    ) -> Self {
        let state = web::Data::new(state);

        let http_server = HttpServer::new(move || {
            App::new()
                .wrap(NormalizePath::trim())
                .wrap(actix_cors::Cors::permissive())
                .wrap(TracingLogger::default())
                .configure(configure_application(
                    state.clone(),
                    json_body_limit_bytes,
                ))
        })
        .workers(1)
        .disable_signals()
        .bind((Ipv4Addr::LOCALHOST, 0))
        .expect("failed to bind test server to an ephemeral port");

        let server_address: SocketAddr = *http_server
            .addrs()
            .first()
            .expect("test server is not bound to any address");

        let running_server = http_server.run();
        let server_handle = running_server.handle();
        actix_web::rt::spawn(running_server);


        let client = ClientBuilder::new()
            .user_agent(TEST_USER_AGENT)
            .build()
            .expect("failed to set up reqwest client");

        Self {
            base_url: format!("http://{}", server_address),
            client,
            server_handle,
            postgres_database,
        }
    }

    pub fn request<U>(&self, method: Method, endpoint: U) -> TestRequestBuilder
    where
        U: AsRef<str>,
    {
        let request_builder = self.client.request(
            method,
            format!("{}{}", self.base_url, endpoint.as_ref()),
        );

        TestRequestBuilder { request_builder }
    }

    pub async fn stop(self) {
        self.server_handle.stop(true).await;

        if let Some(postgres_database) = self.postgres_database {
            postgres_database.drop_database().await;
        }
    }
}


pub struct TestRequestBuilder {
    request_builder: RequestBuilder,
}

impl TestRequestBuilder {
    pub fn with_json_body<V>(mut self, value: V) -> Self
    where
        V: Serialize,
    {
        let serialized_body = serde_json::to_vec(&value).expect("failed to serialize value to JSON");

        self.request_builder = self.request_builder.body(serialized_body);
        self.request_builder = self
            .request_builder
            .header(header::CONTENT_TYPE, "application/json");

        self
    }

    /// Appends URL-encoded query parameters to the request.
    pub fn with_query<Q>(mut self, query: &Q) -> Self
    where
        Q: Serialize + ?Sized,
    {
        self.request_builder = self.request_builder.query(query);
        self
    }

    /// Sends the given bytes as-is, with an `application/json` content type.
    pub fn with_raw_json_body<B>(mut self, body: B) -> Self
    where
        B: Into<Vec<u8>>,
    {
        self.request_builder = self.request_builder.body(body.into());
        self.request_builder = self
            .request_builder
            .header(header::CONTENT_TYPE, "application/json");

        self
    }

    pub async fn send(self) -> TestResponse {
        let response = self
            .request_builder
            .send()
            .await
            .expect("failed to perform HTTP request");

        TestResponse::from_reqwest_response(response).await
    }
}
