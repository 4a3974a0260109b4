//! Technical attributes carried by a series.
//!
//! The attribute list is declared once; the macro derives the struct, the
//! descriptor table and the by-name accessors from it, so storage, display,
//! DDL checks and browsing queries all agree on the same field set.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::choices::*;
use crate::error::CatalogError;

/// How an attribute is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Small integer code from a closed vocabulary.
    Coded(&'static [(u16, &'static str)]),
    /// Yes / no / unknown.
    Flag,
    /// Non-negative count.
    Count,
}

/// Static description of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub kind: AttributeKind,
}

impl AttributeDescriptor {
    /// Human-readable rendering of a stored value.
    pub fn label_for(&self, value: AttributeValue) -> Option<String> {
        match (self.kind, value) {
            (AttributeKind::Coded(vocabulary), AttributeValue::Code(code)) => vocabulary
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, label)| label.to_string()),
            (AttributeKind::Flag, AttributeValue::Flag(flag)) => {
                Some(if flag { "Да" } else { "Нет" }.to_string())
            }
            (AttributeKind::Count, AttributeValue::Count(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Codes accepted by a coded attribute; empty for flags and counts.
    pub fn codes(&self) -> Vec<u16> {
        match self.kind {
            AttributeKind::Coded(vocabulary) => vocabulary.iter().map(|(code, _)| *code).collect(),
            _ => Vec::new(),
        }
    }

    /// Convert a raw JSON value into a typed attribute value.
    ///
    /// `null` clears the attribute. The vocabulary itself is checked when the
    /// value is stored.
    pub fn value_from_json(&self, value: &Value) -> Result<Option<AttributeValue>, CatalogError> {
        if value.is_null() {
            return Ok(None);
        }
        match self.kind {
            AttributeKind::Coded(_) => value
                .as_u64()
                .and_then(|n| u16::try_from(n).ok())
                .map(|code| Some(AttributeValue::Code(code)))
                .ok_or_else(|| invalid_choice(self.name, value)),
            AttributeKind::Flag => value
                .as_bool()
                .map(|flag| Some(AttributeValue::Flag(flag)))
                .ok_or_else(|| invalid_kind(self.name, "a boolean", value)),
            AttributeKind::Count => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(|n| Some(AttributeValue::Count(n)))
                .ok_or_else(|| invalid_kind(self.name, "a non-negative integer", value)),
        }
    }
}

/// A stored attribute value, independent of its vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Flag(bool),
    Code(u16),
    Count(u32),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Code(code) => write!(f, "{}", code),
            AttributeValue::Flag(flag) => write!(f, "{}", flag),
            AttributeValue::Count(n) => write!(f, "{}", n),
        }
    }
}

fn unknown_attribute(field: &str) -> CatalogError {
    CatalogError::UnknownField {
        entity: "Series".to_string(),
        field: field.to_string(),
    }
}

fn invalid_choice(field: &str, value: impl fmt::Display) -> CatalogError {
    CatalogError::InvalidChoice {
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn invalid_kind(field: &str, expected: &str, value: impl fmt::Display) -> CatalogError {
    CatalogError::invalid("Series", field, format!("expected {}, got {}", expected, value))
}

macro_rules! series_attributes {
    (
        coded { $( $cfield:ident : $ctype:ident => $cname:literal ),+ $(,)? }
        flags { $( $ffield:ident => $fname:literal ),+ $(,)? }
        counts { $( $nfield:ident => $nname:literal ),+ $(,)? }
    ) => {
        /// Optional technical attributes of a series.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default, deny_unknown_fields)]
        pub struct SeriesAttributes {
            $( pub $cfield: Option<$ctype>, )+
            $( pub $ffield: Option<bool>, )+
            $( pub $nfield: Option<u32>, )+
        }

        static DESCRIPTORS: &[AttributeDescriptor] = &[
            $( AttributeDescriptor {
                name: stringify!($cfield),
                display_name: $cname,
                kind: AttributeKind::Coded($ctype::VOCABULARY),
            }, )+
            $( AttributeDescriptor {
                name: stringify!($ffield),
                display_name: $fname,
                kind: AttributeKind::Flag,
            }, )+
            $( AttributeDescriptor {
                name: stringify!($nfield),
                display_name: $nname,
                kind: AttributeKind::Count,
            }, )+
        ];

        impl SeriesAttributes {
            /// Read one attribute by field name.
            pub fn get(&self, field: &str) -> Result<Option<AttributeValue>, CatalogError> {
                $( if field == stringify!($cfield) {
                    return Ok(self.$cfield.map(|v| AttributeValue::Code(v.code())));
                } )+
                $( if field == stringify!($ffield) {
                    return Ok(self.$ffield.map(AttributeValue::Flag));
                } )+
                $( if field == stringify!($nfield) {
                    return Ok(self.$nfield.map(AttributeValue::Count));
                } )+
                Err(unknown_attribute(field))
            }

            /// Write one attribute by field name. `None` clears it.
            pub fn set(&mut self, field: &str, value: Option<AttributeValue>) -> Result<(), CatalogError> {
                $( if field == stringify!($cfield) {
                    self.$cfield = match value {
                        None => None,
                        Some(AttributeValue::Code(code)) => {
                            Some($ctype::from_code(code).ok_or_else(|| invalid_choice(field, code))?)
                        }
                        Some(other) => return Err(invalid_choice(field, other)),
                    };
                    return Ok(());
                } )+
                $( if field == stringify!($ffield) {
                    self.$ffield = match value {
                        None => None,
                        Some(AttributeValue::Flag(flag)) => Some(flag),
                        Some(other) => return Err(invalid_kind(field, "a boolean", other)),
                    };
                    return Ok(());
                } )+
                $( if field == stringify!($nfield) {
                    self.$nfield = match value {
                        None => None,
                        Some(AttributeValue::Count(n)) => Some(n),
                        Some(AttributeValue::Code(n)) => Some(u32::from(n)),
                        Some(other) => return Err(invalid_kind(field, "a non-negative integer", other)),
                    };
                    return Ok(());
                } )+
                Err(unknown_attribute(field))
            }
        }
    };
}

series_attributes! {
    coded {
        power_range: PowerRange => "Диапазон мощностей",
        control_methods: ControlMethods => "Методы управления",
        motors: Motors => "Двигатели",
        maximum_output_frequency: MaximumFrequency => "Максимальная выходная частота, Гц",
        overload_capacity: Overload => "Перегрузочная способность",
        starting_torque: StartingTorque => "Пусковой момент",
        carrier_frequency: CarrierFrequency => "Несущая частота ШИМ, кГц",
        multi_pump_system: MultiPump => "Много-насосный режим",
        different_engines_work: DifferentEngines => "Работа с разными двигателями",
        skip_frequency: SkipFrequency => "Пропуск критических частот",
        cooling_fan_control: CoolingFanControl => "Управление вентилятором охлаждения",
        engine_protection: EngineProtection => "Защита двигателя",
        stop_prevention: StopPrevention => "Предотвращение перегрузки",
        inputs_outputs: InputsOutputs => "Входы/выходы",
        pulse_frequency_setting: PulseFrequencySetting => "Импульсное задание частоты",
        control_panel: ControlPanel => "Панель управления",
        potentiometer: Potentiometer => "Потенциометр",
        removable_control_panel: RemovablePanel => "Съёмная панель",
        control_panel_at_distance: PanelAtDistance => "Выносная панель",
        pre_configurations: Configurations => "Предварительные конфигурации (Макросы)",
        copy_backup_settings: BackupSettings => "Копирование/бэкап настроек",
        communications: Communications => "Протоколы связи",
        built_in_plc: Plc => "Встроенный ПЛК",
        encoder_support: Encoder => "Подключение энкодера",
        external_power_24v: ExternalPower => "Подключение резервного питания +24В",
        built_in_usb: Usb => "Встроенный порт USB",
        pc_soft: PcSoft => "Софт для отладки на ПК",
        emc_filter: EmcFilter => "Встроенный EMC фильтр",
        choke_dc_link: ChokeDc => "Дроссель в звене постоянного тока",
        brake_interrupter: BrakeInterrupter => "Тормозной прерыватель",
        motor_cable_length: MotorCable => "Максимальная длина кабеля двигателя",
        operating_temp: OperatingTemp => "Рабочая температура, ℃",
        use_relative_humidity: Humidity => "Относительная влажность при эксплуатации",
        installation_altitude: Altitude => "Высота установки",
        wall_to_wall_installation: WallToWall => "Монтаж \"Стенка к стенке\"",
        railway_mounting: RailwayMounting => "Монтаж на дин-рейку",
        protection_degree: ProtectionDegree => "Степень защиты",
        circuit_boards_protection: BoardsProtection => "Защита печатных плат",
        minimum_size: MinimumSize => "Минимальный габарит, ВхШхГ",
        package_set: PackageSet => "Комплект поставки, упаковка",
        case_quality: CaseQuality => "Качество корпуса",
    }
    flags {
        fire_mode => "Пожарный режим",
        sleep_mode => "Спящий режим",
        flying_start => "Подхват на ходу",
        automatic_energy_saving => "Автоматическое энергосбережение",
        automatic_start_after_power_loss => "Преодоление провалов напряжения питания",
        io_expansion_boards => "Платы расширения входов-выходов",
        control_panel_included => "Панель управления в комплекте",
        sto_function => "Стандарт безопасности STO",
        quick_change_fans => "Быстросъёмные вентиляторы",
        dual_circuit_cooling => "Двухконтурное охлаждение",
    }
    counts {
        pid_controller => "Встроенный ПИД-регулятор",
    }
}

lazy_static! {
    static ref DESCRIPTORS_BY_NAME: HashMap<&'static str, &'static AttributeDescriptor> =
        DESCRIPTORS.iter().map(|d| (d.name, d)).collect();
}

/// All series attributes in declaration order.
pub fn attribute_descriptors() -> &'static [AttributeDescriptor] {
    DESCRIPTORS
}

/// Look up an attribute by field name.
pub fn attribute_descriptor(name: &str) -> Option<&'static AttributeDescriptor> {
    DESCRIPTORS_BY_NAME.get(name).copied()
}

/// Resolve the display label of a coded attribute value.
pub fn choice_label(field: &str, code: u16) -> Result<&'static str, CatalogError> {
    let descriptor = attribute_descriptor(field).ok_or_else(|| unknown_attribute(field))?;
    match descriptor.kind {
        AttributeKind::Coded(vocabulary) => vocabulary
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
            .ok_or_else(|| invalid_choice(field, code)),
        _ => Err(invalid_choice(field, code)),
    }
}

impl SeriesAttributes {
    /// Every attribute that currently has a value, in declaration order.
    pub fn present(&self) -> Vec<(&'static AttributeDescriptor, AttributeValue)> {
        DESCRIPTORS
            .iter()
            .filter_map(|d| match self.get(d.name) {
                Ok(Some(value)) => Some((d, value)),
                _ => None,
            })
            .collect()
    }

    /// Apply a flat JSON object of `field: value` pairs.
    ///
    /// Keys that are not attributes are left to the caller; the returned list
    /// holds them in input order.
    pub fn apply_json(
        &mut self,
        fields: &serde_json::Map<String, Value>,
    ) -> Result<Vec<String>, CatalogError> {
        let mut rest = Vec::new();
        for (key, value) in fields {
            match attribute_descriptor(key) {
                Some(descriptor) => self.set(key, descriptor.value_from_json(value)?)?,
                None => rest.push(key.clone()),
            }
        }
        Ok(rest)
    }
}
