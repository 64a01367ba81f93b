mod customers;
mod jobs;
mod services;
