mod api;
mod suite;
