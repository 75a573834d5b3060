//! Installment ledger lines
//!
//! A [`Transaction`] is one installment line of a property file's ledger.
//! Field names follow the wire format shared with the registry front end.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use core_kernel::{format_due_date, FileNo, Money, TransId, CURRENCY_CODE};

use crate::error::RegistryError;
use crate::property_file::PropertyFile;

/// Installment label given to new ledger lines
pub const DEFAULT_INSTALLMENT_NAME: &str = "INSTALLMENT";
/// Transaction type code of an installment line
pub const DEFAULT_TRANS_TYPE: &str = "13";
/// Plot type recorded on new ledger lines
pub const DEFAULT_PLOT_TYPE: &str = "Residential";
/// Status of a line nothing has been paid against yet
pub const DEFAULT_STATUS: &str = "Unpaid";
/// Payment mode recorded on new ledger lines
pub const DEFAULT_PAYMENT_MODE: &str = "Cash";

/// One installment line in a property file's ledger
///
/// # Invariants
///
/// - `balduedeb` is never negative
/// - `balduedeb` only changes when `receivable` or `amount_paid` is set
///   through [`Transaction::set_field`]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    /// 1-based ordinal within the file
    pub seq: u32,
    /// Creation-time unique token
    pub transid: TransId,
    pub line_id: i64,
    pub shortname: String,
    /// Due date as displayed, e.g. `05-03-2024`
    pub duedate: String,
    /// Amount owed for this line
    pub receivable: Money,
    /// Installment index
    pub u_intno: u32,
    /// Installment label
    pub u_intname: String,
    pub transtype: String,
    /// Copy of the owning file's number
    pub itemcode: FileNo,
    pub plottype: String,
    pub currency: String,
    pub description: String,
    /// Copy of the owning file's plot value when the line was created
    pub doctotal: Money,
    pub status: String,
    pub balance: Money,
    balduedeb: Money,
    pub paysrc: Option<String>,
    pub amount_paid: Money,
    pub receipt_date: String,
    pub mode: String,
    pub surcharge: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instrument_no: Option<String>,
}

impl Transaction {
    /// Creates a fresh installment line for `file`
    ///
    /// # Arguments
    ///
    /// * `seq` - Ordinal of the new line, also used as installment index
    /// * `file` - The file the line belongs to
    /// * `due` - Initial due date
    pub fn installment(seq: u32, file: &PropertyFile, due: NaiveDate) -> Self {
        Self {
            seq,
            transid: TransId::generate(),
            line_id: 0,
            shortname: String::new(),
            duedate: format_due_date(due),
            receivable: Money::zero(),
            u_intno: seq,
            u_intname: DEFAULT_INSTALLMENT_NAME.to_string(),
            transtype: DEFAULT_TRANS_TYPE.to_string(),
            itemcode: file.file_no.clone(),
            plottype: DEFAULT_PLOT_TYPE.to_string(),
            currency: CURRENCY_CODE.to_string(),
            description: String::new(),
            doctotal: file.plot_value,
            status: DEFAULT_STATUS.to_string(),
            balance: Money::zero(),
            balduedeb: Money::zero(),
            paysrc: None,
            amount_paid: Money::zero(),
            receipt_date: String::new(),
            mode: DEFAULT_PAYMENT_MODE.to_string(),
            surcharge: Money::zero(),
            instrument_no: None,
        }
    }

    /// Sets the amount owed and recomputes the outstanding balance
    pub fn with_receivable(mut self, receivable: Money) -> Self {
        self.receivable = receivable;
        self.recompute_outstanding();
        self
    }

    /// Sets the amount paid and recomputes the outstanding balance
    pub fn with_amount_paid(mut self, paid: Money) -> Self {
        self.amount_paid = paid;
        self.recompute_outstanding();
        self
    }

    /// Unpaid remainder of this line
    pub fn balduedeb(&self) -> Money {
        self.balduedeb
    }

    /// Stores `value` in `field`
    ///
    /// Money inputs (`receivable`, `amount_paid`) are coerced leniently, with
    /// non-numeric values worth zero, and trigger a recompute of the
    /// outstanding balance. Text fields keep the value verbatim. Integer
    /// fields reject anything that is not a whole number.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidFieldValue`] when an integer field
    /// receives a non-integer, or a text field receives an array or object.
    pub fn set_field(&mut self, field: TransactionField, value: &Value) -> Result<(), RegistryError> {
        use TransactionField as F;

        match field {
            F::Receivable => {
                self.receivable = Money::coerce_json(value);
                self.recompute_outstanding();
            }
            F::AmountPaid => {
                self.amount_paid = Money::coerce_json(value);
                self.recompute_outstanding();
            }
            F::Seq => self.seq = integer(field, value)?,
            F::Transid => self.transid = TransId::new(integer(field, value)?),
            F::LineId => self.line_id = integer(field, value)?,
            F::UIntNo => self.u_intno = integer(field, value)?,
            F::Doctotal => self.doctotal = Money::new(integer(field, value)?),
            F::Balance => self.balance = Money::new(integer(field, value)?),
            F::Surcharge => self.surcharge = Money::new(integer(field, value)?),
            F::Shortname => self.shortname = text(field, value)?,
            F::Duedate => self.duedate = text(field, value)?,
            F::UIntName => self.u_intname = text(field, value)?,
            F::Transtype => self.transtype = text(field, value)?,
            F::Itemcode => self.itemcode = FileNo::new(text(field, value)?),
            F::Plottype => self.plottype = text(field, value)?,
            F::Currency => self.currency = text(field, value)?,
            F::Description => self.description = text(field, value)?,
            F::Status => self.status = text(field, value)?,
            F::ReceiptDate => self.receipt_date = text(field, value)?,
            F::Mode => self.mode = text(field, value)?,
            F::Paysrc => self.paysrc = optional_text(field, value)?,
            F::InstrumentNo => self.instrument_no = optional_text(field, value)?,
        }

        Ok(())
    }

    fn recompute_outstanding(&mut self) {
        self.balduedeb = Money::outstanding(self.receivable, self.amount_paid);
    }
}

/// Editable fields of a ledger line
///
/// `balduedeb` is derived and deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionField {
    Seq,
    Transid,
    LineId,
    Shortname,
    Duedate,
    Receivable,
    #[serde(rename = "u_intno")]
    UIntNo,
    #[serde(rename = "u_intname")]
    UIntName,
    Transtype,
    Itemcode,
    Plottype,
    Currency,
    Description,
    Doctotal,
    Status,
    Balance,
    Paysrc,
    AmountPaid,
    ReceiptDate,
    Mode,
    Surcharge,
    InstrumentNo,
}

impl TransactionField {
    /// All editable fields, in wire order
    pub const ALL: [TransactionField; 22] = [
        TransactionField::Seq,
        TransactionField::Transid,
        TransactionField::LineId,
        TransactionField::Shortname,
        TransactionField::Duedate,
        TransactionField::Receivable,
        TransactionField::UIntNo,
        TransactionField::UIntName,
        TransactionField::Transtype,
        TransactionField::Itemcode,
        TransactionField::Plottype,
        TransactionField::Currency,
        TransactionField::Description,
        TransactionField::Doctotal,
        TransactionField::Status,
        TransactionField::Balance,
        TransactionField::Paysrc,
        TransactionField::AmountPaid,
        TransactionField::ReceiptDate,
        TransactionField::Mode,
        TransactionField::Surcharge,
        TransactionField::InstrumentNo,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionField::Seq => "seq",
            TransactionField::Transid => "transid",
            TransactionField::LineId => "line_id",
            TransactionField::Shortname => "shortname",
            TransactionField::Duedate => "duedate",
            TransactionField::Receivable => "receivable",
            TransactionField::UIntNo => "u_intno",
            TransactionField::UIntName => "u_intname",
            TransactionField::Transtype => "transtype",
            TransactionField::Itemcode => "itemcode",
            TransactionField::Plottype => "plottype",
            TransactionField::Currency => "currency",
            TransactionField::Description => "description",
            TransactionField::Doctotal => "doctotal",
            TransactionField::Status => "status",
            TransactionField::Balance => "balance",
            TransactionField::Paysrc => "paysrc",
            TransactionField::AmountPaid => "amount_paid",
            TransactionField::ReceiptDate => "receipt_date",
            TransactionField::Mode => "mode",
            TransactionField::Surcharge => "surcharge",
            TransactionField::InstrumentNo => "instrument_no",
        }
    }

    /// Returns true for the fields that drive the outstanding balance
    pub fn is_money_input(&self) -> bool {
        matches!(self, TransactionField::Receivable | TransactionField::AmountPaid)
    }
}

impl fmt::Display for TransactionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionField {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownField(s.to_string()))
    }
}

fn invalid(field: TransactionField, value: &Value) -> RegistryError {
    RegistryError::InvalidFieldValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn integer<T: TryFrom<i64>>(field: TransactionField, value: &Value) -> Result<T, RegistryError> {
    let whole = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    whole
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| invalid(field, value))
}

fn text(field: TransactionField, value: &Value) -> Result<String, RegistryError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Null => Ok(String::new()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Array(_) | Value::Object(_) => Err(invalid(field, value)),
    }
}

fn optional_text(field: TransactionField, value: &Value) -> Result<Option<String>, RegistryError> {
    let stored = text(field, value)?;
    Ok(if stored.is_empty() { None } else { Some(stored) })
}
