//! Frame extraction system
//!
//! Takes the newest frame copied out of the render world, strips the GPU
//! row padding and publishes the RGBA bytes for the frontend.

use std::time::Instant;

use bevy::{log::info, prelude::*, render::renderer::RenderDevice, time::Time};

use crate::bevy::resources::{
    FrameBufferRes, FrameCount, FrameRateLimiter, FrameTimings, MainWorldReceiver, PerfStatsRes,
    PreRollFrames,
};
use crate::config::{performance::*, RENDER_HEIGHT, RENDER_WIDTH};

/// Publish the newest rendered frame to the shared frame buffer
pub fn extract_and_process_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    perf_stats: Option<Res<PerfStatsRes>>,
    mut count: ResMut<FrameCount>,
    mut pre_roll: ResMut<PreRollFrames>,
    mut timings: ResMut<FrameTimings>,
    mut frame_limiter: ResMut<FrameRateLimiter>,
    time: Res<Time>,
) {
    let Some(buffer) = buffer else { return };

    // The first frames show a half-built scene
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        return;
    }

    let now = Instant::now();
    if now.duration_since(frame_limiter.last_frame_time) < frame_limiter.min_frame_interval {
        while receiver.try_recv().is_ok() {}
        return;
    }
    frame_limiter.last_frame_time = now;

    let Some(raw) = receiver.try_iter().last() else {
        return;
    };
    let receive_ms = now.elapsed().as_secs_f64() * 1000.0;

    let process_start = Instant::now();
    let row_bytes = RENDER_WIDTH as usize * 4;
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(row_bytes);
    let rgba = strip_row_padding(raw, row_bytes, aligned_row_bytes, RENDER_HEIGHT as usize);
    let process_ms = process_start.elapsed().as_secs_f64() * 1000.0;
    let size_kb = rgba.len() as f64 / 1024.0;

    let Ok(mut guard) = buffer.0 .0.lock() else {
        return;
    };
    *guard = Some(rgba);
    drop(guard);

    count.0 += 1;
    let total_ms = now.elapsed().as_secs_f64() * 1000.0;
    timings.record(total_ms, FRAME_TIMING_SAMPLES);

    if let Some(perf_res) = &perf_stats {
        if let Ok(mut stats) = perf_res.0 .0.lock() {
            stats.gpu_transfer_ms = receive_ms;
            stats.data_processing_ms = process_ms;
            stats.frame_encoding_ms = total_ms;
            stats.frame_count = count.0;
            stats.data_size_kb = size_kb;
            stats.bevy_fps = timings.average().map_or(0.0, |avg| 1000.0 / avg);
        }
    }

    let current_time = time.elapsed_secs_f64();
    if current_time - timings.last_print_time >= STATS_PRINT_INTERVAL {
        info!(
            "[Bevy] Frame {} | Receive: {:.2}ms | Process: {:.2}ms | Avg: {:.2}ms | Size: {:.1}KB",
            count.0,
            receive_ms,
            process_ms,
            timings.average().unwrap_or(0.0),
            size_kb
        );
        timings.last_print_time = current_time;
    }
}

impl FrameTimings {
    /// Keep the last `limit` frame times
    pub fn record(&mut self, ms: f64, limit: usize) {
        self.frame_times.push(ms);
        if self.frame_times.len() > limit {
            let excess = self.frame_times.len() - limit;
            self.frame_times.drain(..excess);
        }
    }

    /// Mean frame time, ignoring a zero mean
    pub fn average(&self) -> Option<f64> {
        if self.frame_times.is_empty() {
            return None;
        }
        let avg = self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64;
        (avg > 0.0).then_some(avg)
    }
}

/// Drop the alignment padding GPU buffers add to every row
fn strip_row_padding(
    data: Vec<u8>,
    row_bytes: usize,
    aligned_row_bytes: usize,
    height: usize,
) -> Vec<u8> {
    if row_bytes == aligned_row_bytes {
        return data;
    }
    data.chunks(aligned_row_bytes)
        .take(height)
        .flat_map(|row| &row[..row_bytes.min(row.len())])
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_removed_from_each_row() {
        let data = vec![1, 2, 3, 0, 4, 5, 6, 0, 9, 9, 9, 9];
        assert_eq!(strip_row_padding(data, 3, 4, 2), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn unpadded_rows_pass_through() {
        let data = vec![7; 16];
        assert_eq!(strip_row_padding(data.clone(), 8, 8, 2), data);
    }

    #[test]
    fn timings_keep_a_bounded_window() {
        let mut timings = FrameTimings::default();
        assert_eq!(timings.average(), None);
        for ms in 1..=10 {
            timings.record(ms as f64, 4);
        }
        assert_eq!(timings.frame_times, vec![7.0, 8.0, 9.0, 10.0]);
        assert_eq!(timings.average(), Some(8.5));
    }
}
