use time::Date;

/// Energy consumed on a calendar day, as stored.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Reading {
    pub id: i64,
    pub date: Date,
    pub kwh_used: f64,
}

/// A reading that has passed validation but has no identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub date: Date,
    pub kwh_used: f64,
}
