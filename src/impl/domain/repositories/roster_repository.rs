use fractic_server_error::ServerError;

use crate::entities::{Employee, Roster};

pub trait RosterRepository {
    fn load(&self) -> Result<Roster, ServerError>;

    fn add(&self, employee: Employee) -> Result<(), ServerError>;
}
