//! Field constraints for the two entry forms, rendered empty on `GET /`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Calendar date; browsers show a date picker.
    Date,
    Number,
}

impl InputKind {
    pub fn html_type(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Number => "number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub required: bool,
    pub min: Option<i64>,
    /// `"any"` for real numbers, `"1"` for integers.
    pub step: Option<&'static str>,
    pub help_text: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSpec {
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlankForms {
    pub reading: FormSpec,
    pub tariff: FormSpec,
}

pub const READING_FORM: FormSpec = FormSpec {
    title: "Meter reading",
    fields: &[
        FieldSpec {
            name: "date",
            label: "Date",
            kind: InputKind::Date,
            required: true,
            min: None,
            step: None,
            help_text: None,
        },
        FieldSpec {
            name: "kwh_used",
            label: "Kwh used",
            kind: InputKind::Number,
            required: true,
            min: None,
            step: Some("any"),
            help_text: None,
        },
    ],
};

pub const TARIFF_FORM: FormSpec = FormSpec {
    title: "Tariff",
    fields: &[FieldSpec {
        name: "price_per_kwh",
        label: "Price per kwh",
        kind: InputKind::Number,
        required: true,
        min: Some(0),
        step: Some("1"),
        help_text: Some("Enter price in pence (e.g., 15 for £0.15)"),
    }],
};

/// Both forms, unfilled. Has no side effects.
pub fn blank_forms() -> BlankForms {
    BlankForms {
        reading: READING_FORM,
        tariff: TARIFF_FORM,
    }
}
