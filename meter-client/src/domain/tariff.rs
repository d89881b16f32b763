/// Price per kWh in minor currency units (pence).
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Tariff {
    pub id: i64,
    pub price_per_kwh: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTariff {
    pub price_per_kwh: i64,
}
