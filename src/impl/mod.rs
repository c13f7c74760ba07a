// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod attendance_workbook_datasource;
        pub(crate) mod hours_ledger_csv_datasource;
        pub(crate) mod normalized_hours_csv_datasource;
        pub(crate) mod report_csv_datasource;
        pub(crate) mod roster_csv_datasource;
        mod utils;
    }
    pub(crate) mod models {
        pub(crate) mod day_label_model;
        pub(crate) mod employee_id_model;
        pub(crate) mod hourly_wage_model;
        pub(crate) mod hours_amount_model;
        pub(crate) mod iso_date_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod attendance_source_repository_impl;
        pub(crate) mod hours_ledger_repository_impl;
        pub(crate) mod roster_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod anchor_index;
        pub(crate) mod attendance_format;
        pub(crate) mod attendance_record;
        pub(crate) mod column_mapping;
        pub(crate) mod employee_pay;
        pub(crate) mod hours_ledger_entry;
        pub(crate) mod import_outcome;
        pub(crate) mod payroll_report;
        pub(crate) mod punch;
        pub(crate) mod raw_grid;
        pub(crate) mod roster;
    }
    pub(crate) mod logic {
        pub(crate) mod column_sheet_reader;
        pub(crate) mod expected_hours_policy;
        pub(crate) mod extraction_engine;
        pub(crate) mod layout_locator;
        pub(crate) mod pay_processor;
        pub(crate) mod punch_parser;
        pub(crate) mod shift_calculator;
        pub(crate) mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod attendance_source_repository;
        pub(crate) mod hours_ledger_repository;
        pub(crate) mod roster_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod import_usecase;
        pub(crate) mod payroll_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod import_printer;
    pub(crate) mod payroll_printer;
    pub(crate) mod records_csv_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::anchor_index::*;
        pub use crate::domain::entities::attendance_format::*;
        pub use crate::domain::entities::attendance_record::*;
        pub use crate::domain::entities::column_mapping::*;
        pub use crate::domain::entities::employee_pay::*;
        pub use crate::domain::entities::hours_ledger_entry::*;
        pub use crate::domain::entities::import_outcome::*;
        pub use crate::domain::entities::payroll_report::*;
        pub use crate::domain::entities::punch::*;
        pub use crate::domain::entities::raw_grid::*;
        pub use crate::domain::entities::roster::*;
    }

    /// Pure attendance pipeline, usable without any file or ledger.
    pub mod engine {
        pub use crate::domain::logic::column_sheet_reader::*;
        pub use crate::domain::logic::expected_hours_policy::*;
        pub use crate::domain::logic::extraction_engine::*;
        pub use crate::domain::logic::layout_locator::LayoutLocator;
        pub use crate::domain::logic::punch_parser::*;
        pub use crate::domain::logic::shift_calculator::*;
    }

    pub mod repositories {
        pub use crate::data::repositories::hours_ledger_repository_impl::*;
        pub use crate::data::repositories::roster_repository_impl::*;
        pub use crate::domain::repositories::hours_ledger_repository::*;
        pub use crate::domain::repositories::roster_repository::*;
    }
}
