//! Department metadata used to present a recommendation.

use serde::Serialize;

use crate::domain::department::Department;
use crate::hours::BusinessHours;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DepartmentRecord {
    pub department: Department,
    pub name: String,
    pub phone: String,
    pub description: String,
    pub hours: BusinessHours,
}

/// Source of department metadata, looked up by department id.
pub trait DepartmentDirectory {
    fn records(&self) -> &[DepartmentRecord];

    fn lookup(&self, department: Department) -> Option<&DepartmentRecord> {
        self.records().iter().find(|record| record.department == department)
    }
}

#[derive(Debug, Clone, Copy)]
struct DepartmentSeed {
    department: Department,
    name: &'static str,
    phone: &'static str,
    description: &'static str,
    start_hour: u8,
    end_hour: u8,
    open_weekends: bool,
    always_open: bool,
}

const DEPARTMENT_SEEDS: &[DepartmentSeed] = &[
    DepartmentSeed {
        department: Department::Sales,
        name: "Sales",
        phone: "1-800-555-0101",
        description: "Plans, pricing, quotes, and product questions",
        start_hour: 8,
        end_hour: 20,
        open_weekends: false,
        always_open: false,
    },
    DepartmentSeed {
        department: Department::Support,
        name: "Customer Support",
        phone: "1-800-555-0102",
        description: "Account help, warranties, and general questions",
        start_hour: 8,
        end_hour: 22,
        open_weekends: true,
        always_open: false,
    },
    DepartmentSeed {
        department: Department::Tech,
        name: "Technical Support",
        phone: "1-800-555-0103",
        description: "Installation, software, and hardware troubleshooting",
        start_hour: 0,
        end_hour: 24,
        open_weekends: true,
        always_open: true,
    },
    DepartmentSeed {
        department: Department::Billing,
        name: "Billing",
        phone: "1-800-555-0104",
        description: "Invoices, payments, and refunds",
        start_hour: 9,
        end_hour: 17,
        open_weekends: false,
        always_open: false,
    },
    DepartmentSeed {
        department: Department::General,
        name: "General Inquiries",
        phone: "1-800-555-0100",
        description: "Anything else, routed to the right team",
        start_hour: 9,
        end_hour: 17,
        open_weekends: false,
        always_open: false,
    },
];

fn seed_hours(seed: &DepartmentSeed) -> Option<BusinessHours> {
    if seed.always_open {
        return Some(BusinessHours::always_open());
    }
    BusinessHours::new(seed.start_hour, seed.end_hour, seed.open_weekends).ok()
}

/// In-memory directory, either the built-in content or caller-supplied records.
#[derive(Clone, Debug, Default)]
pub struct StaticDirectory {
    records: Vec<DepartmentRecord>,
}

impl StaticDirectory {
    pub fn new(records: Vec<DepartmentRecord>) -> Self {
        Self { records }
    }

    pub fn seeded() -> Self {
        let records = DEPARTMENT_SEEDS
            .iter()
            .filter_map(|seed| {
                seed_hours(seed).map(|hours| DepartmentRecord {
                    department: seed.department,
                    name: seed.name.to_owned(),
                    phone: seed.phone.to_owned(),
                    description: seed.description.to_owned(),
                    hours,
                })
            })
            .collect();
        Self { records }
    }
}

impl DepartmentDirectory for StaticDirectory {
    fn records(&self) -> &[DepartmentRecord] {
        &self.records
    }
}
