//! # Reporting
//!
//! Final per-process table and the optional per-tick graph.

use schedsim_execution::{ProcessState, SimulationResult, Summary, TickObserver, TickRecord};

// =============================================================================
// Final Report
// =============================================================================

/// Print the final report to stdout
pub fn print_report(result: &SimulationResult) {
    print!("{}", format_report(result));
}

/// Render the final report
pub fn format_report(result: &SimulationResult) -> String {
    let mut lines = vec![
        format!("policy: {}", result.policy),
        table_row("PID", "ARRIVAL", "RESPONSE", "TURNAROUND"),
    ];

    lines.extend(result.processes.iter().map(|process| {
        table_row(
            &process.pid.to_string(),
            &process.arrival_time.to_string(),
            &process.response_time.to_string(),
            &process.turnaround_time.to_string(),
        )
    }));

    if let (Some(response), Some(turnaround)) = (result.response, result.turnaround) {
        let rows: [(&str, fn(&Summary) -> String); 3] = [
            ("mean", |s: &Summary| format!("{:.2}", s.mean)),
            ("min", |s: &Summary| s.min.to_string()),
            ("max", |s: &Summary| s.max.to_string()),
        ];
        lines.extend(
            rows.iter()
                .map(|(label, value)| table_row(label, "", &value(&response), &value(&turnaround))),
        );
    }

    let metrics = &result.metrics;
    lines.push(format!(
        "end: {}ms, ticks: {}, cpu: {}%, io ticks: {}, switches: {}, preemptions: {}",
        result.end_time,
        metrics.ticks(),
        metrics.cpu_utilization(),
        metrics.io_ticks(),
        metrics.context_switches(),
        metrics.preemptions()
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// One right-aligned table row
fn table_row(label: &str, arrival: &str, response: &str, turnaround: &str) -> String {
    format!("{:>5} {:>9} {:>9} {:>11}", label, arrival, response, turnaround)
}

// =============================================================================
// Tick Graph
// =============================================================================

/// Prints one row per tick: the time, then one column per process
///
/// | Char | Meaning |
/// |------|---------|
/// | `#`  | on the CPU |
/// | `i`  | I/O serviced this tick |
/// | `~`  | on I/O, waiting |
/// | `.`  | runnable, waiting |
/// | ` `  | not arrived or ended |
#[derive(Debug, Default)]
pub struct GraphObserver {
    header_printed: bool,
}

impl GraphObserver {
    /// Create a new observer
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickObserver for GraphObserver {
    fn on_tick(&mut self, record: &TickRecord<'_>) {
        if !self.header_printed {
            println!("{}", render_header(record.processes.len()));
            self.header_printed = true;
        }
        println!("{}", render_row(record));
    }
}

/// Column header: PID digits modulo 10
pub fn render_header(count: usize) -> String {
    let mut row = format!("{:>7} |", "t(ms)");
    row.extend((0..count).map(|pid| char::from(b'0' + (pid % 10) as u8)));
    row
}

/// One graph row
pub fn render_row(record: &TickRecord<'_>) -> String {
    let mut row = format!("{:>7} |", record.time);
    row.extend(record.processes.iter().map(|process| {
        let pid = Some(process.pid());
        if record.cpu == pid {
            '#'
        } else if record.io == pid {
            'i'
        } else {
            match process.state() {
                ProcessState::OnIo => '~',
                ProcessState::Runnable => '.',
                ProcessState::NotArrived | ProcessState::Ended => ' ',
            }
        }
    }));
    row
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use schedsim_execution::scheduler::SchedulerMetrics;
    use schedsim_execution::{Pid, ProcessDefinition, ProcessExecution, ProcessResult};

    fn execution(pid: usize, arrival: u64, bursts: Vec<u64>) -> ProcessExecution {
        ProcessExecution::new(Pid::new(pid), ProcessDefinition::new(arrival, bursts).unwrap())
    }

    #[test]
    fn test_header() {
        assert_eq!(render_header(12), "  t(ms) |012345678901");
    }

    #[test]
    fn test_row_characters() {
        let mut running = execution(0, 0, vec![50]);
        let mut serviced = execution(1, 0, vec![10, 30, 10]);
        let mut waiting_io = execution(2, 0, vec![10, 30, 10]);
        let mut runnable = execution(3, 0, vec![50]);
        let late = execution(4, 500, vec![50]);

        for process in [&mut running, &mut serviced, &mut waiting_io, &mut runnable] {
            process.arrive(0).unwrap();
        }
        serviced.advance(0, 10).unwrap();
        waiting_io.advance(0, 10).unwrap();
        running.advance(10, 10).unwrap();

        let processes = [running, serviced, waiting_io, runnable, late];
        let record = TickRecord {
            time: 10,
            cpu: Some(Pid::new(0)),
            io: Some(Pid::new(1)),
            processes: &processes,
        };
        assert_eq!(render_row(&record), "     10 |#i~. ");
    }

    #[test]
    fn test_report_contents() {
        let processes = vec![
            ProcessResult {
                pid: Pid::new(0),
                arrival_time: 0,
                response_time: 0,
                turnaround_time: 100,
            },
            ProcessResult {
                pid: Pid::new(1),
                arrival_time: 10,
                response_time: 90,
                turnaround_time: 140,
            },
        ];
        let result = SimulationResult::new("fifo", processes, 150, SchedulerMetrics::new());
        let report = format_report(&result);

        assert!(report.starts_with("policy: fifo\n"));
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[1], "  PID   ARRIVAL  RESPONSE  TURNAROUND");
        assert_eq!(lines[3], table_row("1", "10", "90", "140"));
        assert_eq!(lines[4], table_row("mean", "", "45.00", "120.00"));
        assert_eq!(lines[5], table_row("min", "", "0", "100"));
        assert_eq!(lines[6], table_row("max", "", "90", "140"));
        assert!(report.ends_with('\n'));
        assert!(report.contains("end: 150ms"));
    }

    #[test]
    fn test_report_without_processes() {
        let result = SimulationResult::new("rr", Vec::new(), 0, SchedulerMetrics::new());
        let report = format_report(&result);
        assert!(!report.contains("mean"));
        assert!(report.contains("end: 0ms"));
    }
}
