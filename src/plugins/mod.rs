pub mod grapple_plugin;
