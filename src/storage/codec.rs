//! Record codec
//!
//! Converts a transaction to and from one line of the per-user file:
//!
//! ```text
//! <id>,<TypePrefix>:<CATEGORY>,<amount>,<yyyy-MM-dd or empty>,<member>
//! ```
//!
//! The type prefix is `Income` for income and `Expense:` for expense, so
//! stored lines read `Income:SALARY` and `Expense::HOUSING`. Existing files
//! use this form and it is written unchanged.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Member, Transaction, TransactionFactory, TransactionKind};

use super::members::MemberRegistry;

/// Number of fields in a record
pub const FIELD_COUNT: usize = 5;

/// Date format used in records
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const INCOME_PREFIX: &str = "Income";
const EXPENSE_PREFIX: &str = "Expense:";
const LEGACY_EXPENSE_FIELD: &str = "Expense::";

/// Encodes and decodes transaction records
pub struct RecordCodec;

impl RecordCodec {
    /// The fields of a record, in file order
    pub fn encode_fields(txn: &Transaction) -> [String; FIELD_COUNT] {
        let category = txn.category();
        let prefix = match category.kind() {
            TransactionKind::Income => INCOME_PREFIX,
            TransactionKind::Expense => EXPENSE_PREFIX,
        };

        [
            txn.id().to_string(),
            format!("{}:{}", prefix, category.name()),
            format_amount(txn.amount()),
            txn.date()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            txn.member().name().to_string(),
        ]
    }

    /// Encode one transaction as a line without the trailing newline
    pub fn encode(txn: &Transaction) -> LedgerResult<String> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(Self::encode_fields(txn))?;

        let bytes = writer
            .into_inner()
            .map_err(|e| LedgerError::Csv(e.to_string()))?;
        let line = String::from_utf8(bytes).map_err(|e| LedgerError::Csv(e.to_string()))?;

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Decode one line, registering its member in `registry`
    pub fn decode_line(line: &str, registry: &mut MemberRegistry) -> LedgerResult<Transaction> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());

        let mut record = StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Err(LedgerError::MalformedRecord("record is empty".into()));
        }

        Self::decode_record(&record, registry)
    }

    /// Decode one parsed record, registering its member in `registry`
    pub fn decode_record(
        record: &StringRecord,
        registry: &mut MemberRegistry,
    ) -> LedgerResult<Transaction> {
        if record.len() < FIELD_COUNT {
            return Err(LedgerError::MalformedRecord(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                record.len()
            )));
        }

        let id = decode_id(&record[0])?;
        let category = decode_category(&record[1])?;
        let amount = decode_amount(&record[2])?;
        let date = decode_date(&record[3])?;
        let member = decode_member(&record[4])?;

        registry.add(member.clone());

        let mut txn = TransactionFactory::create(Some(category), amount, date, member)?;
        txn.set_id(id);
        Ok(txn)
    }
}

/// Shortest representation that parses back to the same value, keeping a
/// trailing `.0` on integral amounts
fn format_amount(amount: f64) -> String {
    format!("{:?}", amount)
}

fn decode_id(field: &str) -> LedgerResult<u32> {
    field
        .parse::<u32>()
        .map_err(|_| LedgerError::InvalidId(field.to_string()))
}

/// Split the `Type:NAME` field and resolve the category.
///
/// A recognised type selects the family first; a name that is not in that
/// family, or an unrecognised type, falls back to name-only resolution.
fn decode_category(field: &str) -> LedgerResult<Category> {
    let (type_part, name) = match field.strip_prefix(LEGACY_EXPENSE_FIELD) {
        Some(name) => (TransactionKind::Expense.label(), name),
        None => {
            let parts: Vec<&str> = field.split(':').collect();
            if parts.len() != 2 {
                return Err(LedgerError::MalformedCategoryField(field.to_string()));
            }
            (parts[0], parts[1])
        }
    };

    if name.contains(':') {
        return Err(LedgerError::MalformedCategoryField(field.to_string()));
    }

    match TransactionKind::parse(type_part) {
        Some(kind) => Category::parse_in(kind, name).or_else(|_| Category::parse(name)),
        None => Category::parse(name),
    }
}

fn decode_amount(field: &str) -> LedgerResult<f64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidAmount(field.to_string()));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| LedgerError::InvalidAmount(field.to_string()))
}

fn decode_date(field: &str) -> LedgerResult<Option<NaiveDate>> {
    if field.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(field.trim(), DATE_FORMAT)
        .map(Some)
        .map_err(|_| LedgerError::InvalidDate(field.to_string()))
}

fn decode_member(field: &str) -> LedgerResult<Member> {
    if field.is_empty() {
        return Err(LedgerError::MissingMember);
    }
    Ok(Member::new(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeCategory};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(id: u32, category: Category, amount: f64, date: Option<NaiveDate>, member: &str) -> Transaction {
        let mut t = Transaction::new(category, amount, date, Member::new(member));
        t.set_id(id);
        t
    }

    #[test]
    fn test_encode_income() {
        let t = txn(1, IncomeCategory::Salary.into(), 1000.0, Some(date(2023, 4, 15)), "John Doe");
        assert_eq!(
            RecordCodec::encode(&t).unwrap(),
            "1,Income:SALARY,1000.0,2023-04-15,John Doe"
        );
    }

    #[test]
    fn test_encode_expense_keeps_double_colon() {
        let t = txn(4, ExpenseCategory::Housing.into(), 850.25, Some(date(2023, 5, 1)), "Jane Doe");
        assert_eq!(
            RecordCodec::encode(&t).unwrap(),
            "4,Expense::HOUSING,850.25,2023-05-01,Jane Doe"
        );
    }

    #[test]
    fn test_encode_missing_date_as_empty_field() {
        let t = txn(2, IncomeCategory::Interest.into(), 3.5, None, "A");
        assert_eq!(RecordCodec::encode(&t).unwrap(), "2,Income:INTEREST,3.5,,A");
    }

    #[test]
    fn test_decode_commission_line() {
        let mut registry = MemberRegistry::new();
        let t = RecordCodec::decode_line("2,Income:COMMISSION,1500.0,2023-04-16,Jane Doe", &mut registry)
            .unwrap();

        assert_eq!(t.id(), 2);
        assert_eq!(t.category(), Category::Income(IncomeCategory::Commission));
        assert_eq!(t.amount(), 1500.0);
        assert_eq!(t.date(), Some(date(2023, 4, 16)));
        assert_eq!(t.member().name(), "Jane Doe");
        assert!(registry.find("Jane Doe").is_some());
    }

    #[test]
    fn test_decode_too_few_fields() {
        let mut registry = MemberRegistry::new();
        let err = RecordCodec::decode_line("1,Income:SALARY,1000.0", &mut registry).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedRecord(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_decode_keeps_trailing_empty_fields() {
        let mut registry = MemberRegistry::new();
        let err = RecordCodec::decode_line("1,Income:SALARY,1000.0,,", &mut registry).unwrap_err();
        assert!(matches!(err, LedgerError::MissingMember));
    }

    #[test]
    fn test_decode_ignores_extra_fields() {
        let mut registry = MemberRegistry::new();
        let t = RecordCodec::decode_line("3,Income:SALARY,1.0,2024-01-01,Al,extra", &mut registry).unwrap();
        assert_eq!(t.member().name(), "Al");
    }

    #[test]
    fn test_decode_bad_id() {
        let mut registry = MemberRegistry::new();
        for line in ["x,Income:SALARY,1.0,2024-01-01,A", "-1,Income:SALARY,1.0,2024-01-01,A"] {
            let err = RecordCodec::decode_line(line, &mut registry).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidId(_)), "{line}");
        }
    }

    #[test]
    fn test_decode_malformed_category_field() {
        let mut registry = MemberRegistry::new();
        for line in [
            "1,SALARY,1.0,2024-01-01,A",
            "1,Income:SALARY:X,1.0,2024-01-01,A",
            "1,,1.0,2024-01-01,A",
        ] {
            let err = RecordCodec::decode_line(line, &mut registry).unwrap_err();
            assert!(matches!(err, LedgerError::MalformedCategoryField(_)), "{line}");
        }
    }

    #[test]
    fn test_decode_unknown_category() {
        let mut registry = MemberRegistry::new();
        let err = RecordCodec::decode_line("1,Income:LOTTERY,1.0,2024-01-01,A", &mut registry).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownCategory(ref s) if s == "LOTTERY"));
    }

    #[test]
    fn test_decode_type_prefix_disambiguates_shared_names() {
        let mut registry = MemberRegistry::new();
        let expense = RecordCodec::decode_line("1,Expense::OTHER,9.0,2024-01-01,A", &mut registry).unwrap();
        assert_eq!(expense.category(), Category::Expense(ExpenseCategory::Other));

        let income = RecordCodec::decode_line("2,Income:other,9.0,2024-01-01,A", &mut registry).unwrap();
        assert_eq!(income.category(), Category::Income(IncomeCategory::Other));
    }

    #[test]
    fn test_decode_mismatched_prefix_falls_back_to_name() {
        let mut registry = MemberRegistry::new();
        let t = RecordCodec::decode_line("1,Income:GROCERY,9.0,2024-01-01,A", &mut registry).unwrap();
        assert_eq!(t.category(), Category::Expense(ExpenseCategory::Grocery));
    }

    #[test]
    fn test_decode_invalid_amount() {
        let mut registry = MemberRegistry::new();
        for line in ["1,Income:SALARY,,2024-01-01,A", "1,Income:SALARY,ten,2024-01-01,A"] {
            let err = RecordCodec::decode_line(line, &mut registry).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)), "{line}");
        }
    }

    #[test]
    fn test_decode_dates() {
        let mut registry = MemberRegistry::new();
        let undated = RecordCodec::decode_line("1,Income:SALARY,1.0,,A", &mut registry).unwrap();
        assert_eq!(undated.date(), None);

        let err = RecordCodec::decode_line("1,Income:SALARY,1.0,15/04/2023,A", &mut registry).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate(_)));
    }

    #[test]
    fn test_decode_empty_line() {
        let mut registry = MemberRegistry::new();
        let err = RecordCodec::decode_line("", &mut registry).unwrap_err();
        assert!(matches!(err, LedgerError::MalformedRecord(_)));
    }

    #[test]
    fn test_round_trip_preserves_every_field() {
        let samples = vec![
            txn(1, IncomeCategory::Salary.into(), 1000.0, Some(date(2023, 4, 15)), "John Doe"),
            txn(2, ExpenseCategory::Other.into(), 0.1 + 0.2, Some(date(2024, 2, 29)), "Jane Doe"),
            txn(3, ExpenseCategory::Miscellaneous.into(), -12.75, None, "Max"),
            txn(4, IncomeCategory::Royalties.into(), 1e-7, Some(date(1999, 12, 31)), "Doe, Jane"),
        ];

        let mut registry = MemberRegistry::new();
        for original in samples {
            let line = RecordCodec::encode(&original).unwrap();
            let decoded = RecordCodec::decode_line(&line, &mut registry).unwrap();

            assert_eq!(decoded.id(), original.id());
            assert_eq!(decoded.category(), original.category());
            assert_eq!(decoded.amount().to_bits(), original.amount().to_bits());
            assert_eq!(decoded.date(), original.date());
            assert_eq!(decoded.member(), original.member());
        }
    }

    #[test]
    fn test_member_with_comma_is_quoted() {
        let t = txn(9, IncomeCategory::Salary.into(), 1.0, None, "Doe, Jane");
        assert_eq!(RecordCodec::encode(&t).unwrap(), "9,Income:SALARY,1.0,,\"Doe, Jane\"");
    }

    #[test]
    fn test_decode_applies_csv_quoting_to_member() {
        let mut registry = MemberRegistry::new();
        let t = RecordCodec::decode_line("1,Income:SALARY,1.0,2024-01-01,\"Q\" Bob", &mut registry)
            .unwrap();
        assert_eq!(t.member().name(), "Q Bob");

        // Quotes written by the encoder survive a reload.
        let quoted = txn(2, IncomeCategory::Salary.into(), 1.0, None, "\"Q\" Bob");
        let line = RecordCodec::encode(&quoted).unwrap();
        assert_eq!(line, "2,Income:SALARY,1.0,,\"\"\"Q\"\" Bob\"");
        let decoded = RecordCodec::decode_line(&line, &mut registry).unwrap();
        assert_eq!(decoded.member().name(), "\"Q\" Bob");
    }
}
