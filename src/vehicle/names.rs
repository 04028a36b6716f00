//! Metric names published by the vehicle decoders.
//!
//! Names shared across vehicles use the `v.` prefix. Values specific to one
//! model carry that model's prefix (`xkn.` for the Kia Niro EV).

/// Cabin temperature.
pub const CABIN_TEMP: &str = "v.e.cabintemp";
/// Outside air temperature.
pub const AMBIENT_TEMP: &str = "v.e.temp";
/// Vehicle speed.
pub const SPEED: &str = "v.p.speed";
/// Odometer reading, in the vehicle's configured unit.
pub const ODOMETER: &str = "v.p.odometer";
/// Vehicle identification number.
pub const VIN: &str = "v.vin";
/// Selected gear: -1 reverse, 0 park or neutral, 1 drive.
pub const GEAR: &str = "v.e.gear";
/// Vehicle is switched on.
pub const ENV_ON: &str = "v.e.on";
/// Headlights are on.
pub const HEADLIGHTS: &str = "v.e.headlights";
/// Rear window defroster is on.
pub const REAR_DEFROST: &str = "v.e.rear.defrost";

/// Front left door is open.
pub const DOOR_FL: &str = "v.d.fl";
/// Front right door is open.
pub const DOOR_FR: &str = "v.d.fr";
/// Rear left door is open.
pub const DOOR_RL: &str = "v.d.rl";
/// Rear right door is open.
pub const DOOR_RR: &str = "v.d.rr";
/// Hood is open.
pub const HOOD: &str = "v.d.hood";
/// Charge port flap is open.
pub const CHARGE_PORT: &str = "v.d.cp";

/// Front left door is locked.
pub const LOCK_FL: &str = "xkn.v.lock.fl";
/// Front right door is locked.
pub const LOCK_FR: &str = "xkn.v.lock.fr";
/// Rear left door is locked.
pub const LOCK_RL: &str = "xkn.v.lock.rl";
/// Rear right door is locked.
pub const LOCK_RR: &str = "xkn.v.lock.rr";
/// Driver's seat belt is fastened.
pub const BELT_DRIVER: &str = "xkn.v.seat.belt.driver";
/// Front passenger's seat belt is fastened.
pub const BELT_PASSENGER: &str = "xkn.v.seat.belt.passenger";
/// Rear left seat belt is fastened.
pub const BELT_BACK_LEFT: &str = "xkn.v.seat.belt.back.left";
/// Rear middle seat belt is fastened.
pub const BELT_BACK_MIDDLE: &str = "xkn.v.seat.belt.back.middle";
/// Rear right seat belt is fastened.
pub const BELT_BACK_RIGHT: &str = "xkn.v.seat.belt.back.right";
/// Hazard lights are on.
pub const EMERGENCY_LIGHTS: &str = "xkn.v.emergency.lights";
/// Traction control is active.
pub const TRACTION_CONTROL: &str = "xkn.v.traction.control";
/// Steering wheel heater is on.
pub const HEATED_HANDLE: &str = "xkn.v.heated.handle";
/// Ignition is on.
pub const IGNITION: &str = "xkn.v.ignition";

/// Displayed state of charge of the traction battery.
pub const BATTERY_SOC: &str = "v.b.soc";
/// State of health of the traction battery.
pub const BATTERY_SOH: &str = "v.b.soh";
/// Traction battery current; negative while charging.
pub const BATTERY_CURRENT: &str = "v.b.current";
/// Traction battery voltage.
pub const BATTERY_VOLTAGE: &str = "v.b.voltage";
/// Traction battery power.
pub const BATTERY_POWER: &str = "v.b.power";
/// Traction battery temperature.
pub const BATTERY_TEMP: &str = "v.b.temp";
/// Highest battery module temperature.
pub const BATTERY_MAX_TEMP: &str = "xkn.b.max.temp";
/// Lowest battery module temperature.
pub const BATTERY_MIN_TEMP: &str = "xkn.b.min.temp";
/// Battery coolant inlet temperature.
pub const BATTERY_INLET_TEMP: &str = "xkn.b.inlet.temp";
/// State of charge as reported by the battery management system.
pub const BMS_SOC: &str = "xkn.b.bms.soc";
/// Battery main relay is closed.
pub const MAIN_RELAY: &str = "xkn.b.main.relay";
/// Highest cell voltage.
pub const CELL_VOLTAGE_MAX: &str = "xkn.b.cell.voltage.max";
/// Number of the cell with the highest voltage.
pub const CELL_VOLTAGE_MAX_NO: &str = "xkn.b.cell.voltage.max.no";
/// Lowest cell voltage.
pub const CELL_VOLTAGE_MIN: &str = "xkn.b.cell.voltage.min";
/// Number of the cell with the lowest voltage.
pub const CELL_VOLTAGE_MIN_NO: &str = "xkn.b.cell.voltage.min.no";
/// Lifetime charge taken into the battery.
pub const COULOMB_RECD: &str = "v.b.coulomb.recd.total";
/// Lifetime charge drawn from the battery.
pub const COULOMB_USED: &str = "v.b.coulomb.used.total";
/// Lifetime energy taken into the battery.
pub const ENERGY_RECD: &str = "v.b.energy.recd.total";
/// Lifetime energy drawn from the battery.
pub const ENERGY_USED: &str = "v.b.energy.used.total";
/// Battery management system operating time.
pub const OPERATING_TIME: &str = "xkn.b.operating.time";

/// 12 V auxiliary battery current.
pub const AUX_CURRENT: &str = "v.b.12v.current";
/// 12 V auxiliary battery voltage.
pub const AUX_VOLTAGE: &str = "v.b.12v.voltage";
/// 12 V auxiliary battery state of charge.
pub const AUX_SOC: &str = "xkn.b.aux.soc";

/// Charging power; cleared while not charging.
pub const CHARGE_POWER: &str = "v.c.power";
/// On-board charger temperature.
pub const CHARGE_TEMP: &str = "v.c.temp";
/// Charge pilot signal duty cycle.
pub const CHARGE_PILOT_DUTY: &str = "xkn.c.pilot.duty";
/// AC supply voltage while charging.
pub const CHARGE_AC_VOLTAGE: &str = "xkn.c.ac.voltage";
/// AC supply current while charging.
pub const CHARGE_AC_CURRENT: &str = "xkn.c.ac.current";
/// DC voltage delivered by the on-board charger.
pub const CHARGE_DC_VOLTAGE: &str = "xkn.c.dc.voltage";

/// Drive motor temperature.
pub const MOTOR_TEMP: &str = "v.m.temp";
/// Inverter temperature.
pub const INVERTER_TEMP: &str = "v.i.temp";

/// Voltage of battery cell `index`, counting from zero.
#[must_use]
pub fn cell_voltage(index: usize) -> String { format!("v.b.c.voltage.{index}") }

/// Temperature of battery module `index`, counting from zero.
#[must_use]
pub fn module_temp(index: usize) -> String { format!("v.b.c.temp.{index}") }

/// Transmitter id of tyre pressure sensor `index`.
#[must_use]
pub fn tpms_id(index: usize) -> String { format!("xkn.tpms.id.{index}") }

/// Tyre position labels, in sensor order.
pub const TYRES: [&str; 4] = ["fl", "fr", "rr", "rl"];

/// Pressure of the tyre at `position`.
#[must_use]
pub fn tyre_pressure(position: &str) -> String { format!("v.tp.{position}.p") }

/// Temperature of the tyre at `position`.
#[must_use]
pub fn tyre_temp(position: &str) -> String { format!("v.tp.{position}.t") }
