//! Target database dialects and their physical column type vocabularies.
//!
//! A [`Dialect`] is injected once per run. Only MySQL, MariaDB and PostgreSQL
//! carry a [`PhysicalTypeTable`]; `x-db-type` overrides against any other
//! dialect are rejected as unsupported.

use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use serde::{Serialize, Serializer};

use crate::generator::errors::{ModelgenError, Result};

pub(crate) const ARRAY_MARKER: &str = "[]";

/// Maps lower-cased physical column type tokens to abstract type names.
#[derive(Debug)]
pub struct PhysicalTypeTable {
  entries: HashMap<&'static str, &'static str>,
}

impl PhysicalTypeTable {
  fn new(entries: &[(&'static str, &'static str)]) -> Self {
    Self {
      entries: entries.iter().copied().collect(),
    }
  }

  fn extend(base: &Self, entries: &[(&'static str, &'static str)]) -> Self {
    let mut merged = base.entries.clone();
    merged.extend(entries.iter().copied());
    Self { entries: merged }
  }

  pub fn lookup(&self, token: &str) -> Option<&'static str> {
    self.entries.get(token.to_ascii_lowercase().as_str()).copied()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

static MYSQL_TYPES: LazyLock<PhysicalTypeTable> = LazyLock::new(|| {
  PhysicalTypeTable::new(&[
    ("tinyint", "tinyint"),
    ("bit", "integer"),
    ("smallint", "smallint"),
    ("mediumint", "integer"),
    ("int", "integer"),
    ("integer", "integer"),
    ("bigint", "bigint"),
    ("float", "float"),
    ("double", "double"),
    ("double precision", "double"),
    ("real", "float"),
    ("decimal", "decimal"),
    ("numeric", "decimal"),
    ("tinytext", "text"),
    ("mediumtext", "text"),
    ("longtext", "text"),
    ("longblob", "binary"),
    ("blob", "binary"),
    ("text", "text"),
    ("varchar", "string"),
    ("string", "string"),
    ("char", "char"),
    ("datetime", "datetime"),
    ("year", "date"),
    ("date", "date"),
    ("time", "time"),
    ("timestamp", "timestamp"),
    ("enum", "string"),
    ("set", "string"),
    ("binary", "binary"),
    ("varbinary", "binary"),
    ("json", "json"),
  ])
});

static MARIADB_TYPES: LazyLock<PhysicalTypeTable> = LazyLock::new(|| {
  PhysicalTypeTable::extend(
    &MYSQL_TYPES,
    &[("uuid", "string"), ("inet4", "string"), ("inet6", "string"), ("longjson", "json")],
  )
});

static POSTGRES_TYPES: LazyLock<PhysicalTypeTable> = LazyLock::new(|| {
  PhysicalTypeTable::new(&[
    ("bit", "integer"),
    ("bit varying", "integer"),
    ("varbit", "integer"),
    ("bool", "boolean"),
    ("boolean", "boolean"),
    ("box", "string"),
    ("circle", "string"),
    ("point", "string"),
    ("line", "string"),
    ("lseg", "string"),
    ("polygon", "string"),
    ("path", "string"),
    ("character", "char"),
    ("char", "char"),
    ("bpchar", "char"),
    ("character varying", "string"),
    ("varchar", "string"),
    ("text", "text"),
    ("bytea", "binary"),
    ("cidr", "string"),
    ("inet", "string"),
    ("macaddr", "string"),
    ("real", "float"),
    ("float4", "float"),
    ("double precision", "double"),
    ("float8", "double"),
    ("decimal", "decimal"),
    ("numeric", "decimal"),
    ("money", "money"),
    ("smallint", "smallint"),
    ("int2", "smallint"),
    ("int4", "integer"),
    ("int", "integer"),
    ("integer", "integer"),
    ("bigint", "bigint"),
    ("int8", "bigint"),
    ("oid", "bigint"),
    ("smallserial", "smallint"),
    ("serial2", "smallint"),
    ("serial4", "integer"),
    ("serial", "integer"),
    ("bigserial", "bigint"),
    ("serial8", "bigint"),
    ("date", "date"),
    ("interval", "string"),
    ("time without time zone", "time"),
    ("time", "time"),
    ("timestamp without time zone", "timestamp"),
    ("timestamp", "timestamp"),
    ("timestamp with time zone", "timestamp"),
    ("timestamptz", "timestamp"),
    ("time with time zone", "time"),
    ("timetz", "time"),
    ("abstime", "timestamp"),
    ("tsquery", "string"),
    ("tsvector", "string"),
    ("txid_snapshot", "string"),
    ("unknown", "string"),
    ("uuid", "string"),
    ("json", "json"),
    ("jsonb", "json"),
    ("xml", "string"),
  ])
});

/// A relational database engine targeted by the generated models.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
  #[default]
  MySql,
  MariaDb,
  PostgreSql,
  Sqlite,
  /// Any other driver, kept by name for error messages.
  Other(String),
}

impl Dialect {
  /// Picks the dialect from a connection driver name and server version.
  ///
  /// A `mysql` driver talking to a server whose version string contains
  /// `MariaDB` is MariaDB.
  pub fn detect(driver: &str, server_version: Option<&str>) -> Self {
    match driver.trim().to_ascii_lowercase().as_str() {
      "mysql" if server_version.is_some_and(|v| v.contains("MariaDB")) => Self::MariaDb,
      "mysql" => Self::MySql,
      "mariadb" => Self::MariaDb,
      "pgsql" | "postgres" | "postgresql" => Self::PostgreSql,
      "sqlite" | "sqlite3" => Self::Sqlite,
      _ => Self::Other(driver.trim().to_string()),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Self::MySql => "mysql",
      Self::MariaDb => "mariadb",
      Self::PostgreSql => "pgsql",
      Self::Sqlite => "sqlite",
      Self::Other(name) => name.as_str(),
    }
  }

  pub fn physical_type_table(&self) -> Option<&'static PhysicalTypeTable> {
    match self {
      Self::MySql => Some(&*MYSQL_TYPES),
      Self::MariaDb => Some(&*MARIADB_TYPES),
      Self::PostgreSql => Some(&*POSTGRES_TYPES),
      Self::Sqlite | Self::Other(_) => None,
    }
  }

  /// Declared column type for `format: date-time` strings.
  pub fn datetime_db_type(&self) -> &'static str {
    match self {
      Self::PostgreSql => "timestamp",
      _ => "datetime",
    }
  }

  /// Maps an `x-db-type` override to the abstract type of this dialect.
  ///
  /// The token is lower-cased, a trailing `[]` and any `(size)` suffix are
  /// dropped before lookup, and the array marker is re-applied to the result.
  pub fn map_override(&self, property: &str, db_type: &str) -> Result<String> {
    let Some(table) = self.physical_type_table() else {
      return Err(ModelgenError::NotSupported {
        dialect: self.name().to_string(),
        message: format!("x-db-type '{db_type}' on '{property}' requires a physical type table"),
      });
    };

    let (token, is_array) = normalize_type_token(db_type);
    let mapped = table.lookup(&token).ok_or_else(|| {
      ModelgenError::invalid_definition(
        property,
        format!("x-db-type '{db_type}' is not a known {} column type", self.name()),
      )
    })?;

    Ok(if is_array {
      format!("{mapped}{ARRAY_MARKER}")
    } else {
      mapped.to_string()
    })
  }
}

impl fmt::Display for Dialect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for Dialect {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
    Ok(Self::detect(s, None))
  }
}

impl Serialize for Dialect {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(self.name())
  }
}

/// Lower-cases a declared type, strips `[]` and `(size)`, and reports whether it was an array.
pub(crate) fn normalize_type_token(db_type: &str) -> (String, bool) {
  let trimmed = db_type.trim();
  let (base, is_array) = match trimmed.strip_suffix(ARRAY_MARKER) {
    Some(base) => (base.trim_end(), true),
    None => (trimmed, false),
  };
  let base = base.split_once('(').map_or(base, |(head, _)| head).trim();
  (base.to_ascii_lowercase(), is_array)
}
