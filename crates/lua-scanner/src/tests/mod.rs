mod driver;
mod properties;
