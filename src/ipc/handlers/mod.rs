pub mod auth;
pub mod calendar;
pub mod classes;
pub mod core;
pub mod crud;
pub mod dashboard;
pub mod groups;
pub mod inbox;
pub mod marks;
pub mod payments;
pub mod people;
pub mod ui;
