pub mod graft;
