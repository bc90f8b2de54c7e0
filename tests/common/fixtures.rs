/// Test log fixtures for consistent testing

/// Bandwidth log with three measurement blocks and tool chatter in between
#[allow(dead_code)] // Test helper
pub fn erftest_log() -> &'static str {
    r#"[1704067200] Mon Jan 01 00:00:00 UTC 2024
------------------------------------------------------------
Client connecting to 10.0.0.1, TCP port 5001
TCP window size: 85.0 KByte (default)
------------------------------------------------------------
[  3] local 10.0.0.2 port 40000 connected with 10.0.0.1 port 5001
[ ID] Interval       Transfer     Bandwidth
[  3]  0.0-10.0 sec  1.10 GBytes   942 Mbits/sec
[1704067260] Mon Jan 01 00:01:00 UTC 2024
[  3]  0.0-10.0 sec  512 MBytes   430 Mbits/sec
[1704067320] Mon Jan 01 00:02:00 UTC 2024
[  3]  0.0-10.0 sec  2 GBytes   1 Gbits/sec
"#
}

/// Bandwidth log covering later minutes of the same link
#[allow(dead_code)] // Test helper
pub fn erftest_log_later() -> &'static str {
    r#"[1704067290] Mon Jan 01 00:01:30 UTC 2024
[  3]  0.0-10.0 sec  100 KBytes   80 Kbits/sec
"#
}

/// Latency log with one clean block, one lossy block and one unreachable block
#[allow(dead_code)] // Test helper
pub fn pingtest_log() -> &'static str {
    r#"[1704067200] Mon Jan 01 00:00:00 UTC 2024
PING 10.0.0.1 (10.0.0.1) 56(84) bytes of data.
64 bytes from 10.0.0.1: icmp_seq=1 ttl=64 time=0.412 ms
64 bytes from 10.0.0.1: icmp_seq=2 ttl=64 time=0.398 ms

--- 10.0.0.1 ping statistics ---
5 packets transmitted, 5 received, 0% packet loss, time 4005ms
rtt min/avg/max/mdev = 0.398/0.405/0.412/0.007 ms
[1704067260] Mon Jan 01 00:01:00 UTC 2024
PING 10.0.0.1 (10.0.0.1) 56(84) bytes of data.

--- 10.0.0.1 ping statistics ---
5 packets transmitted, 4 received, 20% packet loss, time 4004ms
rtt min/avg/max/mdev = 1.000/2.000/3.000/0.500 ms
"#
}

#[allow(dead_code)] // Test helper
pub fn unrelated_file() -> &'static str {
    "Nothing to see here\n"
}
