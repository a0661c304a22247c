pub mod employee_repo;
