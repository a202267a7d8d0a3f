//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Cross-references are plain foreign-key columns; nothing owns another record.

pub mod audit;
pub mod customer;
pub mod evaluation;
pub mod role;
pub mod shift;
pub mod staff;
pub mod ticket;
pub mod ticket_assign;
pub mod ticket_reply;

pub use audit::Auditable;
pub use customer::{Column as CustomerColumn, Entity as Customer, Model as CustomerModel};
pub use evaluation::{Column as EvaluationColumn, Entity as Evaluation, Model as EvaluationModel};
pub use role::{Column as RoleColumn, Entity as Role, Model as RoleModel};
pub use shift::{Column as ShiftColumn, Entity as Shift, Model as ShiftModel};
pub use staff::{Column as StaffColumn, Entity as Staff, Model as StaffModel};
pub use ticket::{
    Column as TicketColumn, Entity as Ticket, Model as TicketModel, TicketPriority, TicketStatus,
};
pub use ticket_assign::{
    Column as TicketAssignColumn, Entity as TicketAssign, Model as TicketAssignModel, RoleNeeded,
};
pub use ticket_reply::{
    Column as TicketReplyColumn, Entity as TicketReply, Model as TicketReplyModel, SenderType,
};
