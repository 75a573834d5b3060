//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{FileNo, Money};
use domain_registry::{PlotDescriptor, PropertyFile, Transaction};

use crate::fixtures::TemporalFixtures;

/// Builder for ledger lines
///
/// Lines are attached to a file when the file is built, so `itemcode` and
/// `doctotal` come from that file.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    seq: u32,
    receivable: Money,
    amount_paid: Money,
    due: NaiveDate,
    description: String,
}

impl TransactionBuilder {
    /// Creates a builder for the line with this `seq`
    pub fn new(seq: u32) -> Self {
        Self {
            seq,
            receivable: Money::zero(),
            amount_paid: Money::zero(),
            due: TemporalFixtures::first_due_date(),
            description: String::new(),
        }
    }

    /// Sets the amount owed
    pub fn receivable(mut self, amount: i64) -> Self {
        self.receivable = Money::new(amount);
        self
    }

    /// Sets the amount paid
    pub fn paid(mut self, amount: i64) -> Self {
        self.amount_paid = Money::new(amount);
        self
    }

    /// Sets the due date
    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due = date;
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Builds the line for `file`
    pub fn build_for(self, file: &PropertyFile) -> Transaction {
        let mut line = Transaction::installment(self.seq, file, self.due)
            .with_receivable(self.receivable)
            .with_amount_paid(self.amount_paid);
        line.description = self.description;
        line
    }
}

/// Builder for property files
#[derive(Debug, Clone)]
pub struct PropertyFileBuilder {
    file_no: FileNo,
    owner_name: String,
    owner_cnic: String,
    father_name: String,
    address: String,
    plot_no: PlotDescriptor,
    block: PlotDescriptor,
    plot_value: Money,
    reg_date: String,
    lines: Vec<TransactionBuilder>,
}

impl Default for PropertyFileBuilder {
    fn default() -> Self {
        Self::new("TEST-001")
    }
}

impl PropertyFileBuilder {
    /// Creates a builder with default values
    pub fn new(file_no: impl Into<FileNo>) -> Self {
        Self {
            file_no: file_no.into(),
            owner_name: "Test Owner".to_string(),
            owner_cnic: "00000-0000000-0".to_string(),
            father_name: String::new(),
            address: String::new(),
            plot_no: PlotDescriptor::not_applicable(),
            block: PlotDescriptor::not_applicable(),
            plot_value: Money::zero(),
            reg_date: "05 Mar 2024".to_string(),
            lines: Vec::new(),
        }
    }

    pub fn with_owner(mut self, name: impl Into<String>, cnic: impl Into<String>) -> Self {
        self.owner_name = name.into();
        self.owner_cnic = cnic.into();
        self
    }

    pub fn with_father_name(mut self, name: impl Into<String>) -> Self {
        self.father_name = name.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Sets plot number and block
    pub fn with_location(mut self, plot_no: &str, block: &str) -> Self {
        self.plot_no = plot_no.into();
        self.block = block.into();
        self
    }

    pub fn with_plot_value(mut self, value: i64) -> Self {
        self.plot_value = Money::new(value);
        self
    }

    /// Adds a ledger line
    pub fn with_line(mut self, line: TransactionBuilder) -> Self {
        self.lines.push(line);
        self
    }

    /// Adds a line per `(receivable, paid)` pair, numbered from 1
    pub fn with_installments(mut self, amounts: &[(i64, i64)]) -> Self {
        let start = self.lines.len() as u32;
        for (offset, &(receivable, paid)) in amounts.iter().enumerate() {
            let seq = start + offset as u32 + 1;
            self.lines
                .push(TransactionBuilder::new(seq).receivable(receivable).paid(paid));
        }
        self
    }

    /// Builds the file, with totals reduced from its ledger
    pub fn build(self) -> PropertyFile {
        let mut file = PropertyFile::new(self.file_no, self.owner_name, self.owner_cnic);
        file.father_name = self.father_name;
        file.address = self.address;
        file.plot_no = self.plot_no;
        file.block = self.block;
        file.plot_value = self.plot_value;
        file.reg_date = self.reg_date;

        let lines = self.lines.into_iter().map(|line| line.build_for(&file)).collect();
        file.with_ledger(lines)
    }
}
