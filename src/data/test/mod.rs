mod reiatsu_config;
mod reiatsu_player;
