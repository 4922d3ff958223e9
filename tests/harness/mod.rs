pub mod recording_cluster;
