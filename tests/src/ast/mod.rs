mod builder;
mod locator;
