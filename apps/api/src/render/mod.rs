pub mod latex;
