//! `AgentConfig`: process-wide, single-writer (spec.md §3). Mutated only by
//! `set_config`; read by `get_config` and `desc_stats`.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    pub flags: u16,
    pub miss_send_len: u16,
    pub config_set_done: bool,
    pub sw_desc: String,
    pub hw_desc: String,
    pub dp_desc: String,
    pub mfr_desc: String,
    pub serial_num: String,
}

impl Default for AgentConfig {
    fn default() -> AgentConfig {
        AgentConfig {
            flags: 0,
            miss_send_len: 128,
            config_set_done: false,
            sw_desc: "ofstate".to_string(),
            hw_desc: "generic".to_string(),
            dp_desc: "none".to_string(),
            mfr_desc: "unknown".to_string(),
            serial_num: "0".to_string(),
        }
    }
}

impl AgentConfig {
    pub fn set(&mut self, flags: u16, miss_send_len: u16) {
        self.flags = flags;
        self.miss_send_len = miss_send_len;
        self.config_set_done = true;
    }
}
