//! Table catalog module for sqlpkg
//!
//! Table exclusions are resolved against the tables that actually exist in
//! the source database. `TableCatalog` is the seam the table filter talks to;
//! `SqlServerCatalog` is the real implementation over tiberius.

use std::time::Duration;

use futures_util::TryStreamExt;
use log::{debug, warn};
use tiberius::{AuthMethod, Client, Config, EncryptionLevel, QueryItem, SqlBrowser};
use tokio::net::TcpStream;
use tokio_util::compat::TokioAsyncWriteCompatExt;

use crate::connection::ConnectionDescriptor;
use crate::error::SqlPkgResult;

const DEFAULT_PORT: u16 = 1433;

const ENCRYPT: &[&str] = &["Encrypt"];
const INTEGRATED_SECURITY: &[&str] = &["Integrated Security", "Trusted_Connection"];
const APPLICATION_INTENT: &[&str] = &["Application Intent", "ApplicationIntent"];

const USER_TABLES_QUERY: &str = "SELECT QUOTENAME(SCHEMA_NAME(t.schema_id)) + '.' + QUOTENAME(t.name) \
     FROM sys.tables AS t \
     WHERE t.is_ms_shipped = 0 \
     ORDER BY SCHEMA_NAME(t.schema_id), t.name;";

/// Source of the user tables present in a database
#[allow(async_fn_in_trait)]
pub trait TableCatalog {
    /// Schema-qualified, bracket-quoted table names in catalog order
    async fn list_user_tables(&self, descriptor: &ConnectionDescriptor) -> SqlPkgResult<Vec<String>>;
}

/// Lists tables from SQL Server
pub struct SqlServerCatalog {
    application_name: String,
}

impl SqlServerCatalog {
    pub fn new(application_name: impl Into<String>) -> Self {
        SqlServerCatalog {
            application_name: application_name.into(),
        }
    }

    fn config(&self, descriptor: &ConnectionDescriptor) -> Config {
        let server = ServerAddress::parse(&descriptor.server_name);

        let mut config = Config::new();
        config.host(&server.host);
        match (server.port, &server.instance) {
            (Some(port), _) => config.port(port),
            // Port comes from SQL Browser when connecting
            (None, Some(instance)) => config.instance_name(instance),
            (None, None) => config.port(DEFAULT_PORT),
        }
        if !descriptor.database_name.is_empty() {
            config.database(&descriptor.database_name);
        }
        if !descriptor.user_name.is_empty() {
            config.authentication(AuthMethod::sql_server(
                &descriptor.user_name,
                &descriptor.password,
            ));
        } else if descriptor
            .extra_value(INTEGRATED_SECURITY)
            .is_some_and(integrated_security_requested)
        {
            warn!("Integrated security is not supported when listing tables; connecting without credentials");
        }
        if descriptor.trust_server_certificate {
            config.trust_cert();
        }
        if let Some(level) = descriptor.extra_value(ENCRYPT).and_then(encryption_level) {
            config.encryption(level);
        }
        config.readonly(
            descriptor
                .extra_value(APPLICATION_INTENT)
                .is_some_and(|intent| intent.trim().eq_ignore_ascii_case("ReadOnly")),
        );
        config.application_name(&self.application_name);
        config
    }
}

impl TableCatalog for SqlServerCatalog {
    async fn list_user_tables(&self, descriptor: &ConnectionDescriptor) -> SqlPkgResult<Vec<String>> {
        let config = self.config(descriptor);
        debug!("Listing user tables on {}", config.get_addr());

        let connect_timeout = Duration::from_secs(u64::from(descriptor.connect_timeout));
        let tcp = tokio::time::timeout(connect_timeout, TcpStream::connect_named(&config))
            .await
            .map_err(|_| {
                tiberius::error::Error::from(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    format!("no connection after {}s", descriptor.connect_timeout),
                ))
            })
            .and_then(|connected| connected)?;
        tcp.set_nodelay(true).map_err(tiberius::error::Error::from)?;

        let mut client = Client::connect(config, tcp.compat_write()).await?;
        let mut stream = client.simple_query(USER_TABLES_QUERY).await?;

        let mut tables = Vec::new();
        while let Some(item) = stream.try_next().await? {
            if let QueryItem::Row(row) = item {
                if let Some(name) = row.try_get::<&str, _>(0)? {
                    tables.push(name.to_string());
                }
            }
        }

        debug!("Found {} user tables", tables.len());
        Ok(tables)
    }
}

/// TLS level for an `Encrypt` connection-string value
fn encryption_level(value: &str) -> Option<EncryptionLevel> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "mandatory" | "strict" => Some(EncryptionLevel::Required),
        "false" | "no" | "optional" => Some(EncryptionLevel::Off),
        _ => {
            warn!("Ignoring unreadable 'Encrypt' value '{value}' in connection string");
            None
        }
    }
}

fn integrated_security_requested(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "sspi"
    )
}

/// Pieces of a `Data Source` value: `[tcp:]host[\instance][,port]`
#[derive(Debug, PartialEq, Eq)]
struct ServerAddress {
    host: String,
    instance: Option<String>,
    port: Option<u16>,
}

impl ServerAddress {
    fn parse(data_source: &str) -> Self {
        let trimmed = data_source.trim();
        let without_protocol = trimmed
            .get(..4)
            .filter(|protocol| protocol.eq_ignore_ascii_case("tcp:"))
            .map_or(trimmed, |_| &trimmed[4..]);

        let (address, port) = match without_protocol.rsplit_once(',') {
            Some((address, port)) => match port.trim().parse() {
                Ok(port) => (address, Some(port)),
                Err(_) => {
                    warn!("Ignoring unreadable port '{port}' in '{data_source}', using {DEFAULT_PORT}");
                    (address, None)
                }
            },
            None => (without_protocol, None),
        };
        let (host, instance) = match address.split_once('\\') {
            Some((host, instance)) => (host, Some(instance.trim().to_string())),
            None => (address, None),
        };
        let host = match host.trim() {
            "" | "." | "(local)" => "localhost",
            host => host,
        };

        ServerAddress {
            host: host.to_string(),
            instance,
            port,
        }
    }
}
