//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the plot registry. These fixtures are
//! consistent and predictable so tests can assert exact figures.

use chrono::NaiveDate;
use core_kernel::{FileNo, Money};
use domain_registry::{EnrollmentForm, PropertyFile, Transaction};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Typical 5 Marla plot value
    pub fn plot_value() -> Money {
        Money::new(2_500_000)
    }

    /// A single installment amount
    pub fn installment() -> Money {
        Money::new(1_000)
    }

    pub fn zero() -> Money {
        Money::zero()
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Registration date of the sample files (5 Mar 2024)
    pub fn registration_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    /// First installment due date (10 Jan 2024)
    pub fn first_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    /// Export date used by CSV tests (19 Oct 2026)
    pub fn export_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }
}

/// Fixture for registry records
pub struct RegistryFixtures;

impl RegistryFixtures {
    /// File number of the reconciliation sample
    pub fn sample_file_no() -> FileNo {
        FileNo::new("F1")
    }

    /// File `F1` with two lines: (1000 owed, 400 paid) and (500 owed, 500 paid)
    ///
    /// Totals are 900 received and 600 outstanding. The lines are stored
    /// out of `seq` order.
    pub fn sample_file() -> PropertyFile {
        let file = PropertyFile::new("F1", "Ayesha Khan", "35202-1234567-1");
        let due = TemporalFixtures::first_due_date();

        let lines = vec![
            Transaction::installment(2, &file, due)
                .with_receivable(Money::new(500))
                .with_amount_paid(Money::new(500)),
            Transaction::installment(1, &file, due)
                .with_receivable(Money::new(1000))
                .with_amount_paid(Money::new(400)),
        ];
        file.with_ledger(lines)
    }

    /// Three files with distinct identities, `F1` first
    pub fn sample_registry() -> Vec<PropertyFile> {
        let mut second = PropertyFile::new("DIN-002", "Bilal Ahmed", "35201-7654321-3");
        second.plot_no = "14".into();
        second.block = "C".into();
        second.plot_value = MoneyFixtures::plot_value();

        let mut third = PropertyFile::new("LHR-77", "Sana Malik", "42101-1111111-2");
        third.father_name = "Tariq Malik".to_string();
        third.address = "House 5\nStreet 9".to_string();

        vec![Self::sample_file(), second, third]
    }

    /// A complete enrollment form for `DIN-101`
    pub fn enrollment_form() -> EnrollmentForm {
        EnrollmentForm {
            file_no: "DIN-101".to_string(),
            owner_name: "Imran Qureshi".to_string(),
            owner_cnic: "35202-9999999-9".to_string(),
            father_name: "Nadeem Qureshi".to_string(),
            cell_no: "0300-1234567".to_string(),
            address: "Model Town, Lahore".to_string(),
            plot_value: Some(MoneyFixtures::plot_value()),
            ..Default::default()
        }
    }
}
