//! Parameterized statements and the partial-update builder.
//!
//! Values only ever travel as bound parameters; the SQL text is assembled
//! from `'static` identifiers and `$n` placeholders.

use chrono::NaiveDate;
use sqlx::error::BoxDynError;
use sqlx::postgres::PgArguments;
use sqlx::Arguments;
use uuid::Uuid;

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Uuid(Uuid),
    Text(Option<String>),
    Date(Option<NaiveDate>),
    /// Text that must never show up in logs or error messages.
    Secret(String),
}

impl SqlParam {
    /// Diagnostic rendering.
    pub fn render(&self) -> String {
        match self {
            SqlParam::Uuid(id) => id.to_string(),
            SqlParam::Text(Some(text)) => format!("'{}'", text),
            SqlParam::Date(Some(date)) => format!("'{}'", date),
            SqlParam::Text(None) | SqlParam::Date(None) => "NULL".to_string(),
            SqlParam::Secret(_) => "***".to_string(),
        }
    }

    fn add_to(&self, args: &mut PgArguments) -> Result<(), BoxDynError> {
        match self {
            SqlParam::Uuid(id) => args.add(*id),
            SqlParam::Text(text) => args.add(text.clone()),
            SqlParam::Date(date) => args.add(*date),
            SqlParam::Secret(secret) => args.add(secret.clone()),
        }
    }
}

impl From<Uuid> for SqlParam {
    fn from(id: Uuid) -> Self {
        SqlParam::Uuid(id)
    }
}

impl From<String> for SqlParam {
    fn from(text: String) -> Self {
        SqlParam::Text(Some(text))
    }
}

impl From<&str> for SqlParam {
    fn from(text: &str) -> Self {
        SqlParam::Text(Some(text.to_string()))
    }
}

impl From<Option<String>> for SqlParam {
    fn from(text: Option<String>) -> Self {
        SqlParam::Text(text)
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(date: NaiveDate) -> Self {
        SqlParam::Date(Some(date))
    }
}

impl From<Option<NaiveDate>> for SqlParam {
    fn from(date: Option<NaiveDate>) -> Self {
        SqlParam::Date(date)
    }
}

/// SQL text plus its ordered parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self { sql: sql.into(), params: Vec::new() }
    }

    pub fn bind(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    pub fn rendered_params(&self) -> Vec<String> {
        self.params.iter().map(SqlParam::render).collect()
    }

    pub(crate) fn arguments(&self) -> Result<PgArguments, BoxDynError> {
        let mut args = PgArguments::default();
        for param in &self.params {
            param.add_to(&mut args)?;
        }
        Ok(args)
    }
}

/// A column of a known table. Implemented by per-table enums so an update
/// can only name columns that exist.
pub trait Column: Copy {
    const TABLE: &'static str;
    const KEY: &'static str = "id";

    fn name(self) -> &'static str;
}

/// Builds `UPDATE <table> SET a = $1, b = $2 WHERE id = $3` from the
/// columns actually supplied.
#[derive(Debug)]
pub struct UpdateBuilder<C: Column> {
    assignments: Vec<(C, SqlParam)>,
}

impl<C: Column> Default for UpdateBuilder<C> {
    fn default() -> Self {
        Self { assignments: Vec::new() }
    }
}

impl<C: Column> UpdateBuilder<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: C, value: impl Into<SqlParam>) -> Self {
        self.assignments.push((column, value.into()));
        self
    }

    /// Assigns only when a value was supplied.
    pub fn set_present<T: Into<SqlParam>>(self, column: C, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// `None` when nothing was assigned: there is no statement to run.
    pub fn build(self, id: Uuid) -> Option<Statement> {
        if self.assignments.is_empty() {
            return None;
        }

        let clauses: Vec<String> = self
            .assignments
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{} = ${}", column.name(), i + 1))
            .collect();

        let sql = format!(
            "UPDATE {} SET {} WHERE {} = ${}",
            C::TABLE,
            clauses.join(", "),
            C::KEY,
            self.assignments.len() + 1
        );

        let statement = self
            .assignments
            .into_iter()
            .fold(Statement::new(sql), |statement, (_, value)| statement.bind(value));
        Some(statement.bind(id))
    }
}
