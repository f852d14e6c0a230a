//! CSV ingestion for the users and repositories tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use devstats_core::DevstatsError;
use serde::de::DeserializeOwned;

use crate::records::{Repository, User};

/// A row type that can be loaded into a [`Table`].
pub trait Row: DeserializeOwned {
    /// Table name used in error messages.
    const TABLE: &'static str;

    /// The `login` key every row must carry.
    fn login(&self) -> &str;
}

impl Row for User {
    const TABLE: &'static str = "users";

    fn login(&self) -> &str {
        &self.login
    }
}

impl Row for Repository {
    const TABLE: &'static str = "repositories";

    fn login(&self) -> &str {
        &self.login
    }
}

/// Rows of one CSV file, in file order, plus the header it was read with.
///
/// # Examples
///
/// ```
/// use devstats_table::loader::read_table;
/// use devstats_table::User;
///
/// let csv = "login,followers\nalice,10\nbob,oops\n";
/// let table = read_table::<User, _>(csv.as_bytes()).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.rows()[1].followers, None);
/// assert!(table.has_column("followers"));
/// assert!(!table.has_column("bio"));
/// ```
#[derive(Debug, Clone)]
pub struct Table<T> {
    columns: Vec<String>,
    rows: Vec<T>,
    skipped: usize,
}

impl<T: Row> Table<T> {
    /// Build a table from rows already in memory; every column counts as present.
    pub fn from_rows(columns: &[&str], rows: Vec<T>) -> Self {
        Self {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
            skipped: 0,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows dropped because their `login` was blank.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with [`DevstatsError::MissingColumn`] for the first absent column.
    ///
    /// # Errors
    ///
    /// Returns [`DevstatsError::MissingColumn`] naming the table and column.
    pub fn require(&self, columns: &[&str]) -> Result<(), DevstatsError> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(DevstatsError::MissingColumn {
                table: T::TABLE,
                column: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Read a table from any CSV source with a header row.
///
/// Column order is irrelevant and unknown columns are ignored. The `login`
/// column is mandatory; rows with a blank login are skipped. A row with
/// fewer cells than the header reads the missing trailing cells as absent.
///
/// # Errors
///
/// Returns [`DevstatsError::MissingColumn`] without a `login` header and
/// [`DevstatsError::Csv`] when the input is not valid CSV (for example
/// invalid UTF-8).
pub fn read_table<T: Row, R: Read>(reader: R) -> Result<Table<T>, DevstatsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    if !columns.iter().any(|c| c == "login") {
        return Err(DevstatsError::MissingColumn {
            table: T::TABLE,
            column: "login".into(),
        });
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in rdr.deserialize::<T>() {
        let row = record?;
        if row.login().trim().is_empty() {
            skipped += 1;
            continue;
        }
        rows.push(row);
    }

    Ok(Table {
        columns,
        rows,
        skipped,
    })
}

fn open(path: &Path) -> Result<File, DevstatsError> {
    if !path.exists() {
        return Err(DevstatsError::FileNotFound(path.to_path_buf()));
    }
    Ok(File::open(path)?)
}

/// Load the users table from `path`.
///
/// # Errors
///
/// Returns [`DevstatsError::FileNotFound`] if `path` does not exist, plus
/// everything [`read_table`] can return.
pub fn load_users(path: &Path) -> Result<Table<User>, DevstatsError> {
    read_table(open(path)?)
}

/// Load the repositories table from `path`.
///
/// # Errors
///
/// Returns [`DevstatsError::FileNotFound`] if `path` does not exist, plus
/// everything [`read_table`] can return.
pub fn load_repositories(path: &Path) -> Result<Table<Repository>, DevstatsError> {
    read_table(open(path)?)
}

/// Both tables, loaded once and read by every question.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub users: Table<User>,
    pub repositories: Table<Repository>,
}

impl Dataset {
    /// Load both tables.
    ///
    /// # Errors
    ///
    /// Fails on the first table that cannot be loaded; see [`load_users`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use devstats_table::Dataset;
    /// use std::path::Path;
    ///
    /// let data = Dataset::load(Path::new("users.csv"), Path::new("repositories.csv")).unwrap();
    /// println!("{} users, {} repositories", data.users.len(), data.repositories.len());
    /// ```
    pub fn load(users: &Path, repositories: &Path) -> Result<Self, DevstatsError> {
        Ok(Self {
            users: load_users(users)?,
            repositories: load_repositories(repositories)?,
        })
    }
}
