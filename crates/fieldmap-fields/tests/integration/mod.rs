mod concurrency;
mod declared_configuration;
mod geo_links;
mod standard_configuration;
