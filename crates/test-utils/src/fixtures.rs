//! Sample `chronyc -c` output lines.

pub const TRACKING: &str = "50505300,PPS,1,1541793798.895264285,-0.000001007,0.000000291,0.000000239,-17.957,0.000,0.005,0.000001000,0.000010123,16.0,Normal";

pub const SERVERSTATS: &str = "191,222,183,111,231";

pub const SOURCES_PPS: &str = "#,*,PPS,0,4,377,12,0.000000021,0.000000041,0.000000231";
pub const SOURCES_SERVER: &str = "^,-,192.168.1.10,2,6,17,37,-0.000031012,-0.000030873,0.012345000";

pub const SOURCESTATS_PPS: &str = "PPS,32,17,496,-0.000,0.003,0.000000001,0.000000217";
pub const SOURCESTATS_SERVER: &str = "192.168.1.10,12,7,704,0.012,0.097,-0.000021534,0.000126012";

pub const NTPDATA: &str = "192.168.1.10,C0A8010A,123,192.168.1.2,C0A80102,Normal,4,Server,2,6,64.0,-23,0.000000119,0.000564575,0.000717163,C0A80101,192.168.1.1,1541793790.123456789,-0.000031012,0.000269174,0.000001021,0.000091547,0.123000000,111,111,1111,No,No,No,Yes,120,118,118";

/// Join lines the way chronyc prints them, with a trailing newline.
pub fn output(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Split a fixture line into the fields an extractor receives.
pub fn fields(line: &str) -> Vec<&str> {
    line.split(',').collect()
}
