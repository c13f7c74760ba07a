#[derive(Debug, Clone, PartialEq, serde_derive::Serialize)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub hourly_wage: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub employees: Vec<Employee>,
}

impl Roster {
    pub fn lookup(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }
}
