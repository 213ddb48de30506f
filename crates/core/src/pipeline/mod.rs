pub mod monitor_presence_use_case;
