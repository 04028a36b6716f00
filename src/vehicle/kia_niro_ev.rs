//! Decode tables for the Kia Niro EV / e-Niro.
//!
//! Offsets index the assembled payload, which starts after the response
//! service byte and echoed parameter id. Extended (`0x22`) replies carry
//! three data bytes in their first frame and group (`0x21`) replies four;
//! continuation frames carry seven.

use log::debug;

use super::{Vehicle, VehicleTraits, names};
use crate::{
    error::Result,
    frame::{MessageType, ModuleId, ParameterId, PollFrame},
    registry::{DecodeRoutine, DecoderRegistry, FrameDecodeRoutine},
    signal::{
        read_bit,
        read_fixed_string,
        read_i8,
        read_i16_be,
        read_u8,
        read_u16_be,
        read_u32_be,
    },
    sink::{MetricSink, MetricValue, Unit},
};

const AIRCON: ModuleId = ModuleId(0x7bb);
const IGMP: ModuleId = ModuleId(0x778);
const CLUSTER: ModuleId = ModuleId(0x7ce);
const BCM: ModuleId = ModuleId(0x7a8);
const BMC: ModuleId = ModuleId(0x7ec);
const ABS_ESP: ModuleId = ModuleId(0x7d9);
const OBC: ModuleId = ModuleId(0x7ed);
const VMCU: ModuleId = ModuleId(0x7ea);
const MCU: ModuleId = ModuleId(0x7eb);

/// Cells reported by each of the `0x0102`..=`0x0104` battery replies.
const CELLS_PER_BLOCK: usize = 32;
/// Scale of a raw cell voltage byte, in volts.
const CELL_VOLTS_PER_BIT: f64 = 0.02;

/// Tyre pressure and temperature offsets in the `0xC00B` reply, in
/// [`names::TYRES`] order.
const TYRE_OFFSETS: [(usize, usize); 4] = [(4, 5), (9, 10), (12, 13), (16, 17)];

/// Kia Niro EV.
///
/// # Examples
///
/// ```
/// use pollframe::{
///     registry::DecoderRegistry,
///     vehicle::{KiaNiroEv, Vehicle, VehicleTraits},
/// };
///
/// let kia = KiaNiroEv::new(VehicleTraits::default());
/// let mut registry = DecoderRegistry::new();
/// kia.register_decoders(&mut registry).expect("unique keys");
/// assert!(!registry.is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct KiaNiroEv {
    traits: VehicleTraits,
}

impl KiaNiroEv {
    /// Create the vehicle with the given configuration.
    #[must_use]
    pub const fn new(traits: VehicleTraits) -> Self { Self { traits } }

    /// The vehicle's configuration.
    #[must_use]
    pub const fn traits(&self) -> VehicleTraits { self.traits }
}

impl Vehicle for KiaNiroEv {
    fn name(&self) -> &'static str { "kia-niro-ev" }

    fn register_decoders(&self, registry: &mut DecoderRegistry) -> Result<()> {
        let extended = MessageType::OBDII_EXTENDED;
        let group = MessageType::OBDII_GROUP;
        let left_hand_drive = self.traits.left_hand_drive;
        let odometer_unit = Unit::from(self.traits.odometer_unit);

        registry.register(AIRCON, extended, ParameterId(0x0100), decode_climate)?;

        registry.register(
            IGMP,
            extended,
            ParameterId(0xbc03),
            move |payload: &[u8], sink: &mut dyn MetricSink| {
                decode_doors(payload, sink, left_hand_drive);
            },
        )?;
        registry.register(
            IGMP,
            extended,
            ParameterId(0xbc04),
            move |payload: &[u8], sink: &mut dyn MetricSink| {
                decode_belts_and_locks(payload, sink, left_hand_drive);
            },
        )?;
        registry.register(IGMP, extended, ParameterId(0xbc07), decode_rear_defrost)?;

        registry.register(
            CLUSTER,
            extended,
            ParameterId(0xb002),
            move |payload: &[u8], sink: &mut dyn MetricSink| {
                if let Some(raw) = read_u32_be(payload, 6, 3) {
                    sink.set_metric(names::ODOMETER, MetricValue::Int(raw.into()), odometer_unit);
                }
            },
        )?;

        registry.register(
            BCM,
            extended,
            ParameterId(0xb00e),
            |payload: &[u8], sink: &mut dyn MetricSink| {
                set_bit_flag::<5>(payload, 4, sink, names::CHARGE_PORT);
            },
        )?;
        registry.register(
            BCM,
            extended,
            ParameterId(0xb00c),
            |payload: &[u8], sink: &mut dyn MetricSink| {
                set_bit_flag::<5>(payload, 4, sink, names::HEATED_HANDLE);
            },
        )?;
        registry.register(BCM, extended, ParameterId(0xc002), TpmsIds::default())?;
        registry.register(BCM, extended, ParameterId(0xc00b), decode_tyres)?;

        registry.register(BMC, extended, ParameterId(0x0101), decode_battery_status)?;
        registry.register_per_frame(
            BMC,
            extended,
            ParameterId(0x0101),
            CumulativeCounters::default(),
        )?;
        for (block, pid) in (0x0102..=0x0104).enumerate() {
            let first_cell = block * CELLS_PER_BLOCK;
            registry.register(
                BMC,
                extended,
                ParameterId(pid),
                move |payload: &[u8], sink: &mut dyn MetricSink| {
                    decode_cell_block(payload, sink, first_cell);
                },
            )?;
        }
        registry.register(BMC, extended, ParameterId(0x0105), decode_battery_health)?;

        registry.register(
            ABS_ESP,
            extended,
            ParameterId(0xc101),
            |payload: &[u8], sink: &mut dyn MetricSink| {
                set_bit_flag::<6>(payload, 18, sink, names::EMERGENCY_LIGHTS);
                set_bit_flag::<6>(payload, 19, sink, names::TRACTION_CONTROL);
            },
        )?;

        registry.register(OBC, group, ParameterId(0x01), decode_charger)?;
        registry.register(
            OBC,
            group,
            ParameterId(0x03),
            |payload: &[u8], sink: &mut dyn MetricSink| {
                if let Some(raw) = read_u16_be(payload, 4) {
                    set_float(sink, names::CHARGE_AC_CURRENT, f64::from(raw) / 100.0, Unit::Amps);
                }
            },
        )?;

        registry.register(VMCU, group, ParameterId(0x01), decode_gear)?;
        registry.register(VMCU, group, ParameterId(0x02), decode_aux_battery)?;
        registry.register(
            VMCU,
            MessageType::OBDII_1A,
            ParameterId(0x80),
            |payload: &[u8], sink: &mut dyn MetricSink| {
                if let Some(vin) = read_fixed_string(payload, 14, 17) {
                    sink.set_metric(names::VIN, MetricValue::Text(vin), Unit::Native);
                }
            },
        )?;

        registry.register(
            MCU,
            group,
            ParameterId(0x02),
            |payload: &[u8], sink: &mut dyn MetricSink| {
                if let Some(raw) = read_i8(payload, 15) {
                    set_float(sink, names::MOTOR_TEMP, f64::from(raw), Unit::Celsius);
                }
                if let Some(raw) = read_i8(payload, 14) {
                    set_float(sink, names::INVERTER_TEMP, f64::from(raw), Unit::Celsius);
                }
            },
        )?;

        Ok(())
    }
}

fn set_float(sink: &mut dyn MetricSink, name: &str, value: f64, unit: Unit) {
    sink.set_metric(name, MetricValue::Float(value), unit);
}

fn set_flag(sink: &mut dyn MetricSink, name: &str, value: bool) {
    sink.set_metric(name, MetricValue::Bool(value), Unit::Native);
}

fn set_bit_flag<const BIT: u32>(
    payload: &[u8],
    offset: usize,
    sink: &mut dyn MetricSink,
    name: &str,
) {
    if let Some(raw) = read_u8(payload, offset) {
        set_flag(sink, name, read_bit::<BIT>(raw));
    }
}

/// Order a left/right pair as reported by a left-hand-drive build.
fn by_side(left: bool, right: bool, left_hand_drive: bool) -> (bool, bool) {
    if left_hand_drive { (left, right) } else { (right, left) }
}

/// Temperature encoded in half degrees above -40 °C.
fn half_degrees(raw: u8) -> f64 { f64::from(raw) / 2.0 - 40.0 }

fn decode_climate(payload: &[u8], sink: &mut dyn MetricSink) {
    if let Some(raw) = read_u8(payload, 5) {
        set_float(sink, names::CABIN_TEMP, half_degrees(raw), Unit::Celsius);
    }
    if let Some(raw) = read_u8(payload, 6) {
        set_float(sink, names::AMBIENT_TEMP, half_degrees(raw), Unit::Celsius);
    }
    if let Some(raw) = read_u8(payload, 29) {
        set_float(sink, names::SPEED, f64::from(raw), Unit::Kph);
    }
}

fn decode_doors(payload: &[u8], sink: &mut dyn MetricSink, left_hand_drive: bool) {
    if let Some(raw) = read_u8(payload, 5) {
        set_flag(sink, names::ENV_ON, raw & 0x60 > 0);
        set_flag(sink, names::BELT_DRIVER, read_bit::<1>(raw));
        set_flag(sink, names::BELT_PASSENGER, read_bit::<2>(raw));
        set_flag(sink, names::HOOD, read_bit::<0>(raw));
    }
    if let Some(raw) = read_u8(payload, 4) {
        let (fl, fr) = by_side(read_bit::<5>(raw), read_bit::<4>(raw), left_hand_drive);
        let (rl, rr) = by_side(read_bit::<0>(raw), read_bit::<2>(raw), left_hand_drive);
        let (lock_rl, lock_rr) = by_side(read_bit::<1>(raw), read_bit::<3>(raw), left_hand_drive);
        set_flag(sink, names::DOOR_FL, fl);
        set_flag(sink, names::DOOR_FR, fr);
        set_flag(sink, names::DOOR_RL, rl);
        set_flag(sink, names::DOOR_RR, rr);
        set_flag(sink, names::LOCK_RL, lock_rl);
        set_flag(sink, names::LOCK_RR, lock_rr);
    }
}

fn decode_belts_and_locks(payload: &[u8], sink: &mut dyn MetricSink, left_hand_drive: bool) {
    if let Some(raw) = read_u8(payload, 6) {
        let (left, right) = by_side(read_bit::<1>(raw), read_bit::<2>(raw), left_hand_drive);
        set_flag(sink, names::BELT_BACK_LEFT, left);
        set_flag(sink, names::BELT_BACK_MIDDLE, read_bit::<3>(raw));
        set_flag(sink, names::BELT_BACK_RIGHT, right);
    }
    if let Some(raw) = read_u8(payload, 4) {
        let (fl, fr) = by_side(read_bit::<3>(raw), read_bit::<2>(raw), left_hand_drive);
        set_flag(sink, names::LOCK_FL, fl);
        set_flag(sink, names::LOCK_FR, fr);
    }
    match read_u8(payload, 7) {
        Some(raw) => set_flag(sink, names::HEADLIGHTS, read_bit::<4>(raw)),
        None => debug!("headlights: short buffer, len={}", payload.len()),
    }
}

fn decode_rear_defrost(payload: &[u8], sink: &mut dyn MetricSink) {
    set_bit_flag::<1>(payload, 5, sink, names::REAR_DEFROST);
}

fn decode_tyres(payload: &[u8], sink: &mut dyn MetricSink) {
    for (position, (pressure_at, temp_at)) in names::TYRES.into_iter().zip(TYRE_OFFSETS) {
        if let Some(raw) = read_u8(payload, pressure_at).filter(|raw| *raw > 0) {
            set_float(sink, &names::tyre_pressure(position), f64::from(raw) / 5.0, Unit::Psi);
        }
        if let Some(raw) = read_u8(payload, temp_at).filter(|raw| *raw > 0) {
            set_float(sink, &names::tyre_temp(position), f64::from(raw) - 50.0, Unit::Celsius);
        }
    }
}

/// Tyre pressure sensor ids.
///
/// Two of the ids straddle fields that are read separately, so the previous
/// value of each id is kept and only the bits covered by a readable field
/// are replaced.
#[derive(Debug, Default)]
struct TpmsIds([u32; 4]);

impl DecodeRoutine for TpmsIds {
    fn decode(&mut self, payload: &[u8], sink: &mut dyn MetricSink) {
        let ids = &mut self.0;
        if let Some(raw) = read_u32_be(payload, 2, 3) {
            ids[0] = raw;
        }
        if let Some(raw) = read_u32_be(payload, 6, 2) {
            ids[1] = (ids[1] & 0x0000_ffff) | (raw << 16);
        }
        if let Some(raw) = read_u32_be(payload, 10, 2) {
            ids[1] = (ids[1] & 0xffff_0000) | raw;
        }
        if let Some(raw) = read_u32_be(payload, 12, 3) {
            ids[2] = raw;
        }
        if let Some(raw) = read_u8(payload, 15) {
            ids[3] = (ids[3] & 0x00ff_ffff) | (u32::from(raw) << 24);
        }
        if let Some(raw) = read_u32_be(payload, 17, 3) {
            ids[3] = (ids[3] & 0xff00_0000) | raw;
        }
        for (index, id) in ids.iter().enumerate().filter(|(_, id)| **id != 0) {
            sink.set_metric(&names::tpms_id(index), MetricValue::Int((*id).into()), Unit::Native);
        }
    }
}

fn decode_battery_status(payload: &[u8], sink: &mut dyn MetricSink) {
    if let Some(raw) = read_u8(payload, 4) {
        set_float(sink, names::BMS_SOC, f64::from(raw) / 2.0, Unit::Percentage);
    }
    set_bit_flag::<0>(payload, 9, sink, names::MAIN_RELAY);

    let current = read_i16_be(payload, 10);
    match current {
        Some(raw) => set_float(sink, names::BATTERY_CURRENT, f64::from(raw) / 10.0, Unit::Amps),
        None => debug!("battery current: short buffer, len={}", payload.len()),
    }
    match (current, read_u16_be(payload, 12)) {
        (current, Some(raw_voltage)) => {
            let voltage = f64::from(raw_voltage) / 10.0;
            set_float(sink, names::BATTERY_VOLTAGE, voltage, Unit::Volts);
            if let Some(raw_current) = current {
                publish_power(sink, raw_current, voltage);
            }
        }
        (_, None) => debug!("battery voltage: short buffer, len={}", payload.len()),
    }

    if let Some(raw) = read_i8(payload, 14) {
        set_float(sink, names::BATTERY_MAX_TEMP, f64::from(raw), Unit::Celsius);
    }
    if let Some(raw) = read_i8(payload, 15) {
        set_float(sink, names::BATTERY_MIN_TEMP, f64::from(raw), Unit::Celsius);
        set_float(sink, names::BATTERY_TEMP, f64::from(raw), Unit::Celsius);
    }
    for module in 0..4 {
        if let Some(raw) = read_i8(payload, 16 + module) {
            set_float(sink, &names::module_temp(module), f64::from(raw), Unit::Celsius);
        }
    }
    if let Some(raw) = read_i8(payload, 22) {
        set_float(sink, names::BATTERY_INLET_TEMP, f64::from(raw), Unit::Celsius);
    }

    if let Some(raw) = read_u8(payload, 23) {
        set_float(sink, names::CELL_VOLTAGE_MAX, f64::from(raw) / 50.0, Unit::Volts);
    }
    if let Some(raw) = read_u8(payload, 24) {
        sink.set_metric(names::CELL_VOLTAGE_MAX_NO, MetricValue::Int(raw.into()), Unit::Native);
    }
    if let Some(raw) = read_u8(payload, 25) {
        set_float(sink, names::CELL_VOLTAGE_MIN, f64::from(raw) / 50.0, Unit::Volts);
    }
    if let Some(raw) = read_u8(payload, 26) {
        sink.set_metric(names::CELL_VOLTAGE_MIN_NO, MetricValue::Int(raw.into()), Unit::Native);
    }

    set_bit_flag::<2>(payload, 50, sink, names::IGNITION);
}

/// Battery power is published while current flows; charge power only while
/// the pack is charging (negative current).
fn publish_power(sink: &mut dyn MetricSink, raw_current: i16, voltage: f64) {
    let current = f64::from(raw_current) / 10.0;
    if raw_current != 0 {
        set_float(sink, names::BATTERY_POWER, current * voltage, Unit::Watts);
    }
    if raw_current < 0 {
        set_float(sink, names::CHARGE_POWER, -current * voltage, Unit::Watts);
    } else {
        sink.clear_metric(names::CHARGE_POWER);
    }
}

fn decode_cell_block(payload: &[u8], sink: &mut dyn MetricSink, first_cell: usize) {
    for cell in 0..CELLS_PER_BLOCK {
        if let Some(raw) = read_u8(payload, 4 + cell) {
            set_float(
                sink,
                &names::cell_voltage(first_cell + cell),
                f64::from(raw) * CELL_VOLTS_PER_BIT,
                Unit::Volts,
            );
        }
    }
}

fn decode_battery_health(payload: &[u8], sink: &mut dyn MetricSink) {
    if let Some(raw) = read_u16_be(payload, 25) {
        set_float(sink, names::BATTERY_SOH, f64::from(raw) / 10.0, Unit::Percentage);
    }
    if let Some(raw) = read_u8(payload, 31) {
        set_float(sink, names::BATTERY_SOC, f64::from(raw) / 2.0, Unit::Percentage);
    }
    for (cell, offset) in [(96, 32), (97, 33)] {
        if let Some(raw) = read_u8(payload, offset) {
            set_float(
                sink,
                &names::cell_voltage(cell),
                f64::from(raw) * CELL_VOLTS_PER_BIT,
                Unit::Volts,
            );
        }
    }
}

/// Lifetime charge and discharge counters from the `0x0101` battery reply.
///
/// The counters straddle continuation frames 4 to 7. Frames are collected
/// only while they follow frame 0 without a gap; an out-of-sequence frame
/// discards the window until the next reply, so the published values stay
/// as they were.
#[derive(Debug, Default)]
struct CumulativeCounters {
    next_index: Option<u16>,
    window: Vec<u8>,
}

impl CumulativeCounters {
    const FIRST_FRAME: u16 = 4;
    const LAST_FRAME: u16 = 7;

    /// Offsets are relative to the start of frame 4's chunk.
    fn publish(&self, sink: &mut dyn MetricSink) {
        let window = self.window.as_slice();
        if let Some(raw) = read_u32_be(window, 6, 4) {
            set_float(sink, names::COULOMB_RECD, f64::from(raw) * 0.1, Unit::AmpHours);
        }
        if let Some(raw) = read_u32_be(window, 10, 4) {
            set_float(sink, names::COULOMB_USED, f64::from(raw) * 0.1, Unit::AmpHours);
        }
        if let Some(raw) = read_u32_be(window, 14, 4) {
            set_float(sink, names::ENERGY_RECD, f64::from(raw) * 100.0, Unit::WattHours);
        }
        if let Some(raw) = read_u32_be(window, 18, 4) {
            set_float(sink, names::ENERGY_USED, f64::from(raw) * 100.0, Unit::WattHours);
        }
        if let Some(raw) = read_u32_be(window, 22, 4) {
            set_float(sink, names::OPERATING_TIME, f64::from(raw) / 3600.0, Unit::Hours);
        }
    }
}

impl FrameDecodeRoutine for CumulativeCounters {
    fn decode_frame(&mut self, frame: &PollFrame, sink: &mut dyn MetricSink) {
        let index = frame.frame_index.get();
        if index == 0 {
            self.next_index = Some(1);
            self.window.clear();
            return;
        }
        if self.next_index != Some(index) {
            if self.next_index.take().is_some() {
                debug!("cumulative counters: frame out of sequence, index={index}");
            }
            self.window.clear();
            return;
        }

        self.next_index = index.checked_add(1);
        if index >= Self::FIRST_FRAME {
            self.window.extend_from_slice(&frame.chunk);
        }
        if index == Self::LAST_FRAME {
            self.publish(sink);
            self.next_index = None;
            self.window.clear();
        }
    }
}

fn decode_charger(payload: &[u8], sink: &mut dyn MetricSink) {
    if let Some(raw) = read_u8(payload, 27) {
        set_float(sink, names::CHARGE_PILOT_DUTY, f64::from(raw) / 10.0, Unit::Percentage);
    }
    if let Some(raw) = read_u8(payload, 42) {
        set_float(sink, names::CHARGE_TEMP, half_degrees(raw), Unit::Celsius);
    }
    if let Some(raw) = read_u8(payload, 45) {
        set_float(sink, names::CHARGE_AC_VOLTAGE, f64::from(raw), Unit::Volts);
    }
    if let Some(raw) = read_u16_be(payload, 49) {
        set_float(sink, names::CHARGE_DC_VOLTAGE, f64::from(raw) / 10.0, Unit::Volts);
    }
}

/// Shift lever position bits of the `0x01` VMCU reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ShiftBits {
    park: bool,
    reverse: bool,
    neutral: bool,
    drive: bool,
}

impl ShiftBits {
    fn from_raw(raw: u8) -> Self {
        Self {
            park: read_bit::<0>(raw),
            reverse: read_bit::<1>(raw),
            neutral: read_bit::<2>(raw),
            drive: read_bit::<3>(raw),
        }
    }

    fn gear(self) -> i64 {
        if self.reverse {
            -1
        } else if self.drive {
            1
        } else {
            0
        }
    }
}

fn decode_gear(payload: &[u8], sink: &mut dyn MetricSink) {
    let Some(raw) = read_u8(payload, 4) else {
        debug!("shift position: short buffer, len={}", payload.len());
        return;
    };
    let shift = ShiftBits::from_raw(raw);
    debug!(
        "shift position: park={}, neutral={}",
        shift.park, shift.neutral
    );
    sink.set_metric(names::GEAR, MetricValue::Int(shift.gear()), Unit::Native);
}

fn decode_aux_battery(payload: &[u8], sink: &mut dyn MetricSink) {
    if let Some(raw) = read_u16_be(payload, 16) {
        set_float(sink, names::AUX_CURRENT, f64::from(raw) / 1000.0, Unit::Amps);
    }
    if let (Some(high), Some(low)) = (read_u8(payload, 19), read_u8(payload, 20)) {
        let millivolts = (u16::from(high) << 8) | u16::from(low);
        set_float(sink, names::AUX_VOLTAGE, f64::from(millivolts) / 1000.0, Unit::Volts);
    }
    if let Some(raw) = read_u8(payload, 23) {
        set_float(sink, names::AUX_SOC, f64::from(raw), Unit::Percentage);
    }
}
