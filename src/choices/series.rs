//! Vocabularies of the coded series attributes.
//!
//! Codes are stable identifiers persisted in the catalog; labels are the
//! display strings of the comparison tables and are kept verbatim.

coded_choice! {
    /// Supported power range per supply configuration.
    pub enum PowerRange {
        R10 = 10 => "1x230В: 0.4...2.2кВт; 3x400В: 0.75...3.7кВт",
        R11 = 11 => "1x230В: 0.2...2.2кВт; 3x400В: 0.75...2.2кВт",
        R20 = 20 => "1x230В: 0.4...2.2кВт; 3x400В: 0.75...5.5кВт",
        R30 = 30 => "1x230В: 0.2...2.2кВт; 3x400В: 0.4...7.5кВт",
        R31 = 31 => "3x400В: 0.4...11кВт",
        R40 = 40 => "1x230В: 0.4...2.2кВт; 3x400В: 0.75...15кВт",
        R50 = 50 => "1x230В: 0.2...2.2кВт; 3x400В: 0.4...22кВт",
        R51 = 51 => "1x230В: 0.4...2.2кВт; 3x400В: 0.4...22кВт",
        R60 = 60 => "3x400В: 0.75...37кВт",
        R70 = 70 => "3x400В: 0.75...90кВт",
        R80 = 80 => "1x230В: 0.4...2.2кВт; 3x400В: 0.75...110кВт",
        R90 = 90 => "1x230В: 0.4...2.2кВт; 3x400В: 0.75...220кВт",
        R91 = 91 => "1x230В: 0.75...2.2кВт; 3x400В: 0.75...220кВт",
        R100 = 100 => "3x400В: 0.75...500кВт",
        R101 = 101 => "3x400В: 0.75...630кВт",
        R102 = 102 => "1x230В: 0.4...2.2кВт; 3x400В: 0.75...630кВт",
        R103 = 103 => "1x230В: 0.75...2.2кВт; 3x400В: 0.75...630кВт",
        R104 = 104 => "1x230В: 0.2...3.7кВт; 3x400В: 0.75...400кВт",
    }
}

coded_choice! {
    pub enum ControlMethods {
        Scalar = 10 => "V/F (скалярное управление)",
        ScalarSensorless = 20 => "V/F (скалярное управление), \nSVC (бездатчиковое векторное управление)",
        ScalarSensorlessClosedLoop = 30 => "V/F (скалярное управление), \nSVC (бездатчиковое векторное управление), \nVC (векторное управление с замкнутым контуром)",
    }
}

coded_choice! {
    /// Motor technologies the series can drive.
    pub enum Motors {
        Im = 1 => "IM (асинхронные)",
        ImPm = 2 => "IM (асинхронные), PM (синхронные с постоянными магнитами)",
        ImPmSynRm = 3 => "IM (асинхронные), PM (синхронные с постоянными магнитами), SynRM (синхронные реактивные)",
    }
}

coded_choice! {
    /// Maximum output frequency, Hz.
    pub enum MaximumFrequency {
        F10 = 10 => "320",
        F20 = 20 => "599; 90 кВт и выше: 400",
        F21 = 21 => "500",
        F22 = 22 => "400",
        F30 = 30 => "599",
        F31 = 31 => "600",
        F40 = 40 => "999",
        F50 = 50 => "3000 (V/F); 300 (SVC)",
        F51 = 51 => "3200 (V/F); 300 (SVC)",
        F52 = 52 => "3200 (V/F); 500 (SVC)",
        F53 = 53 => "5000",
    }
}

coded_choice! {
    pub enum Overload {
        O10 = 10 => "Лёгкий режим: 120% 60с; \nНормальный режим: 120% 60с, 160% 3с",
        O20 = 20 => "150% 60с; 180% 3с",
        O21 = 21 => "G type: 150% 60с, 180% 3с; \nP type: 120% 60с, 150% 3с",
        O22 = 22 => "150% 60с; 180% 2с; 200% 0.5c",
        O23 = 23 => "G type: 150% 60с; 180% 3с",
        O24 = 24 => "150% 60с каждые 10 мин; 180% 2с",
        O30 = 30 => "110% длит.; 150% 60с; 180% 5с",
        O31 = 31 => "Нормальный режим: 120% 60с, 150% 3с; \nТяжелый режим: 150% 60с, 200% 3с",
        O32 = 32 => "G type: 110% длит.; 150% 60с, 200% 4с; \nP type: 105% длит.; 120% 60с, 150% 1с",
        O33 = 33 => "150% 60с; 180% 10с; 200% 1c",
        O34 = 34 => "G type: 150% 60с; 180% 10с; 200% 1c; \nP type: 120% 60с",
    }
}

coded_choice! {
    pub enum StartingTorque {
        S10 = 10 => "100% ном. крутящего момента при 5,0Гц (V/F управление); 150% ном. крутящего момента при 1,5Гц (пр. векторное упр.)",
        S20 = 20 => "150% / 0.5 Гц",
        S21 = 21 => "G type: 150% / 0.5 Гц (SVC)",
        S22 = 22 => "G type: 150% / 0.5 Гц (SVC);\nP type: 100% / 0.5 Гц",
        S23 = 23 => "150% / 3 Гц (V/F), \n150% / 1 Гц (FVC)",
        S24 = 24 => "150% / 3 Гц (V/F, SVC для IM в тяжёлом режиме)\n100% / 2.5 Гц (V/F, SVC для PM в тяжёлом режиме)",
        S25 = 25 => "100% / 0.5 Гц (V/F); 150% / 0.5 Гц (SVC)",
        S26 = 26 => "150% / 3(1) Гц (V/F); 150% / 0.5 Гц (SVC)",
        S27 = 27 => "G type: 150% / 0.5 Гц; \nP type: 100% / 0.5 Гц",
        S28 = 28 => "Auto torque boost, manual torque boost 0.1%-30%; Vector torque boost 100-150; Start frequency 0.4Hz-20Hz",
        S29 = 29 => "150% / 0.5 Гц (SVC)",
        S30 = 30 => "G type: 150% / 0.5 Гц (SVC), 180% / 0 Гц (VC);\nP type: 100% / 0.5 Гц",
        S31 = 31 => "Auto torque boost, manual torque boost 0.1%-30%; Cut-off frequency of torque boost 0Hz to maximum output frequency",
        S32 = 32 => "До 180% от номинального (Функция намагничивания постоянным током)",
    }
}

coded_choice! {
    /// PWM carrier frequency, kHz.
    pub enum CarrierFrequency {
        C20 = 20 => "2...12 (Default: 3)",
        C21 = 21 => "2...15",
        C22 = 22 => "2...15 (Default: 4)",
        C23 = 23 => "2...16 (Default: 4/3)",
        C24 = 24 => "1...16/10/5 (Default: 6/4.5/3/1.8)",
        C25 = 25 => "0.5...16",
        C26 = 26 => "4...16 (Default: 4)",
        C27 = 27 => "1...16",
        C30 = 30 => "2...15/10/9 (Default: 8/6/4)",
        C31 = 31 => "1...14 (Default: 8)",
        C32 = 32 => "1...15 (Default: 8/4/2)",
    }
}

coded_choice! {
    pub enum MultiPump {
        No = 0 => "Нет",
        TwoPumps = 10 => "Да, 2 насоса",
        UpToThree = 20 => "Да, до 3 насосов",
        UpToFour = 30 => "Да, до 4 насосов",
        UpToEight = 40 => "Да, до 8 насосов",
    }
}

coded_choice! {
    /// Independent motor parameter sets.
    pub enum DifferentEngines {
        No = 0 => "Нет",
        TwoSets = 20 => "2 группы параметров двигателей",
        UpToFourSets = 40 => "До 4 независимых групп параметров двигателя",
    }
}

coded_choice! {
    pub enum SkipFrequency {
        No = 0 => "Нет",
        OneBand = 10 => "Пропуск одной полосы частот",
        TwoBands = 20 => "Пропуск 2-х полос частот",
        ThreeBands = 30 => "Пропуск 3-х полос частот",
        FourBands = 40 => "Пропуск 4-х полос частот",
    }
}

coded_choice! {
    pub enum CoolingFanControl {
        No = 0 => "Нет",
        F10 = 10 => "Работает всё время при включении питания / при команде пуск",
        F20 = 20 => "Режим автоматического управления / работает всё время при включении питания",
        F30 = 30 => "Три режима работы, в том числе по температуре",
        F50 = 50 => "На выбор 5 режимов работы вентилятора",
        F51 = 51 => "На выбор 4 режима работы вентилятора",
    }
}

coded_choice! {
    pub enum EngineProtection {
        Standard = 1 => "Перегрузка по току, перенапряжение, перегрев, потеря фазы и др.",
    }
}

coded_choice! {
    /// Stall prevention by current limiting.
    pub enum StopPrevention {
        P10 = 10 => "Токоограничение при разгоне, замедлении и работе (общая настройка)",
        P11 = 11 => "Токоограничение при работе (общая настройка)",
        P20 = 20 => "Токоограничение при разгоне, замедлении и работе (независимые настройки)",
        P21 = 21 => "Токоограничение при разгоне, работе (независимые настройки)",
    }
}

coded_choice! {
    /// Digital/analog inputs and transistor/relay/analog outputs.
    pub enum InputsOutputs {
        Io10 = 10 => "DI: 4; AI: 1; TO: 0; RO: 1; AO: 1",
        Io20 = 20 => "DI: 4; AI: 2; TO: 0; RO: 1; AO: 1",
        Io30 = 30 => "DI: 5; AI: 1; TO: 1; RO: 1; AO: 1",
        Io40 = 40 => "DI: 6; AI: 2; TO: 0; RO: 1; AO: 1",
        Io41 = 41 => "DI: 5; AI: 2; TO: 1; RO: 1; AO: 1",
        Io50 = 50 => "DI: 5; AI: 2; TO: 1; RO: 2; AO: 2",
        Io60 = 60 => "DI: 6; AI: 2; TO: 1; RO: 2; AO: 2",
        Io61 = 61 => "DI: 6; AI: 2; TO: 2; RO: 1; AO: 2",
        Io70 = 70 => "DI: 7; AI: 2; TO: 3; RO: 1; AO: 1",
        Io71 = 71 => "DI: 7; AI: 2; TO: 2; RO: 2; AO: 1",
        Io72 = 72 => "DI: 8; AI: 2; TO: 2; RO: 1; AO: 1",
        Io80 = 80 => "DI: 7; AI: 3; TO: 2; RO: 1; AO: 2",
        Io81 = 81 => "DI: 8; AI: 2; TO: 2; RO: 2; AO: 2",
        Io90 = 90 => "DI: 10; AI: 3; TO: 0; RO: 3; AO: 2",
    }
}

coded_choice! {
    pub enum PulseFrequencySetting {
        No = 0 => "Нет",
        ExpansionBoard = 1 => "Плата расширения",
        Yes = 2 => "Да",
    }
}

coded_choice! {
    pub enum ControlPanel {
        Led4x7 = 10 => "LED 4x7",
        Led5x7 = 20 => "LED 5x7",
        LedTwoLine = 30 => "LED двухстрочный",
        Led5x7LcdOptional = 31 => "LED 5x7 (LCD опционально)",
        LedTwoLineLcdOptional = 32 => "LED двухстрочный (LCD опционально)",
        Lcd = 60 => "LCD дисплей",
        LcdBasic = 61 => "LCD базовая (LCD интеллектуальная опционально)",
    }
}

coded_choice! {
    pub enum Potentiometer {
        No = 0 => "Нет",
        AddOnBoard = 10 => "Дополнительная плата потенциометра",
        OnPanel = 20 => "Потенциометр в панели управления",
        PushEncoder = 30 => "Нажимное колёсико-энкодер",
    }
}

coded_choice! {
    pub enum RemovablePanel {
        No = 0 => "Нет",
        From22kW = 10 => "Для моделей от 22 кВт",
        Yes = 20 => "Да",
    }
}

coded_choice! {
    pub enum PanelAtDistance {
        No = 0 => "Нет",
        AccessoryCable = 10 => "Да, при помощи кабеля-аксессуара",
        Yes = 11 => "Да",
        Idc10 = 12 => "Да, разъем ВН-10 (IDC-10MS)",
        PatchCord = 20 => "Да, соединение обычным патч-кордом",
    }
}

coded_choice! {
    /// Built-in application presets (macros).
    pub enum Configurations {
        No = 0 => "Нет",
        GroupedByApplication = 10 => "Группировка параметров по применениям",
        ApplicationMacros = 11 => "Макросы по применениям",
        UserGroups = 12 => "Группировка параметров пользователя",
        MacrosAndWizards = 20 => "Макросы, мастера настроек",
    }
}

coded_choice! {
    pub enum BackupSettings {
        No = 0 => "Нет",
        LcdPanel = 20 => "Да (LCD панель)",
        RemoteOnly = 21 => "Да (только для дистанционного управления)",
        Yes = 40 => "Да",
    }
}

coded_choice! {
    /// Fieldbus protocols, built in or on expansion boards.
    pub enum Communications {
        No = 0 => "Нет",
        C10 = 10 => "Плата расширения: Modbus RTU",
        C20 = 20 => "Платы расширения: Modbus RTU, Profibus DP",
        C30 = 30 => "Встроен: Modbus RTU",
        C40 = 40 => "Встроен: Modbus RTU; Платы расширения: Profibus DP",
        C41 = 41 => "Платы расширения: Modbus RTU, Ethernet, Profibus DP, ProfiNet IO, DeviceNet, CANopen, EtherCAT",
        C50 = 50 => "Встроен: Modbus RTU; Платы расширения: Ethernet, Profibus DP",
        C60 = 60 => "Встроен: Modbus RTU; Платы расширения: Profibus DP, CANopen, CANlink",
        C70 = 70 => "Встроен: Modbus RTU; Платы расширения: Ethernet, DeviceNet, CANopen, Profibus DP",
        C80 = 80 => "Встроены: Modbus RTU, BACnet; Платы расширения: Ethernet, DeviceNet, CANopen, Profibus DP",
    }
}

coded_choice! {
    pub enum Plc {
        No = 0 => "Нет",
        Steps2000 = 2 => "ПЛК на 2000 шагов",
        Steps10000 = 3 => "ПЛК на 10000 шагов",
    }
}

coded_choice! {
    pub enum Encoder {
        No = 0 => "Нет",
        PulseInputBoard = 10 => "Импульсный вход (плата расширения)",
        PulseInput = 20 => "Импульсный вход",
        EncoderBoardAbz = 50 => "Плата расширения энкодера (ABZ, UVW, Rotary transformer)",
        EncoderBoard = 51 => "Плата расширения энкодера",
    }
}

coded_choice! {
    /// Backup +24 V supply input.
    pub enum ExternalPower {
        No = 0 => "Нет",
        OptionalBoard = 1 => "Опциональная плата",
        Yes = 2 => "Да",
    }
}

coded_choice! {
    pub enum Usb {
        No = 0 => "Нет",
        Yes = 1 => "Есть (загрузка и выгрузка даже без включения питания)",
    }
}

coded_choice! {
    pub enum PcSoft {
        No = 0 => "Нет",
        Yes = 30 => "Да",
    }
}

coded_choice! {
    pub enum EmcFilter {
        No = 0 => "Нет",
        E10 = 10 => "1x230В: C3; 3x400В: контур ЭМС-фильтра",
        E11 = 11 => "Контур ЭМС-фильтра",
        C3 = 20 => "C3 (для эксплуатации в промышленной зоне)",
        C2 = 30 => "C2 (для эксплуатации в жилой зоне)",
    }
}

coded_choice! {
    /// DC link choke.
    pub enum ChokeDc {
        No = 0 => "Нет",
        C10 = 10 => "Опция от 75кВт",
        C20 = 20 => "Опция 45...400кВт, встроен от 450кВт",
        C30 = 30 => "Опция",
        C40 = 40 => "Встроен на мощности 11, 15 кВт и от 200 кВт",
        C50 = 50 => "Встроен на мощности от 45 кВт",
        C60 = 60 => "Встроен на мощности от 37 кВт",
        C70 = 70 => "Встроен",
    }
}

coded_choice! {
    pub enum BrakeInterrupter {
        No = 0 => "Нет",
        UpTo15kW = 10 => "Встроен на мощности до 15 кВт",
        UpTo22kW = 20 => "Встроен на мощности до 22 кВт",
        UpTo30kW = 30 => "Встроен на мощности до 30 кВт",
        UpTo37kW = 40 => "Встроен на мощности до 37 кВт",
        UpTo45kW = 50 => "Встроен на мощности до 45 кВт",
        BuiltIn = 60 => "Встроен",
    }
}

coded_choice! {
    /// Maximum motor cable length.
    pub enum MotorCable {
        D10 = 10 => "Без дросселя: до 50м; С дросселем: до 100м",
        D11 = 11 => "Если длина кабелей двигателя превышает 50 м, рекомендуется использовать моторный дроссель.",
        D12 = 12 => "Без дросселя: до 50м; С дросселем: до 100м; EMC C3: до 30м",
        D20 = 20 => "Если длина кабелей двигателя превышает 100 м, рекомендуется использовать моторный дроссель.",
        D30 = 30 => "Без дросселя: экран.кабель 35...100м в зависимости от номинала; неэкран. 50...150м. \nС дросселем: экран.кабель 50...150м; неэкран. 90...225м",
        D40 = 40 => "Без дросселя: экран.кабель 50...150м в зависимости от номинала; неэкран. 75...225м. \nС дросселем: экран.кабель 75...225м; неэкран. 115...325м",
    }
}

coded_choice! {
    /// Ambient operating temperature, °C.
    pub enum OperatingTemp {
        T10 = 10 => "-10...+40",
        T20 = 20 => "-10...+40; \nСо снижением характеристик -10...+50",
        T21 = 21 => "-10...+40(50)",
        T30 = 30 => "-10...+40(50); \nСо снижением характеристик -10...+60",
        T40 = 40 => "-10...+50; \nСо снижением характеристик -10...+60",
        T50 = 50 => "-20...+50; \nСо снижением характеристик -20...+60",
    }
}

coded_choice! {
    pub enum Humidity {
        Max60 = 20 => "Макс. 60%",
        Max90 = 40 => "Макс. 90%",
        Max95 = 50 => "Макс. 95%",
    }
}

coded_choice! {
    pub enum Altitude {
        UpTo1000m = 1 => "До 1000м",
        DeratedAbove1000m = 2 => "До 1000м; Свыше 1000м со снижением характеристик",
    }
}

coded_choice! {
    /// Side-by-side mounting without clearance.
    pub enum WallToWall {
        No = 0 => "Нет",
        W10 = 10 => "Допускается для ПЧ от 45 кВт включительно; \nДо 45 кВт: зазор 10мм",
        W20 = 20 => "Допускается при -20...+40℃, \nдо +50℃ со снижением характеристик",
        W21 = 21 => "Допускается при -20...+40℃",
        Allowed = 30 => "Допускается",
    }
}

coded_choice! {
    /// DIN rail mounting.
    pub enum RailwayMounting {
        No = 0 => "Нет",
        MountingKit = 10 => "Монтажный комплект на DIN-рейку",
        Yes = 20 => "Да",
    }
}

coded_choice! {
    pub enum ProtectionDegree {
        Ip20 = 1 => "IP20",
        Ip21 = 2 => "IP21",
        Ip55 = 3 => "IP55",
    }
}

coded_choice! {
    pub enum BoardsProtection {
        No = 0 => "Нет",
        SpecialCoating = 10 => "Специальное покрытие печатных плат",
        TripleCoating = 11 => "Трёхслойное защитное покрытие",
    }
}

coded_choice! {
    /// Smallest frame, H x W x D in mm.
    pub enum MinimumSize {
        M31 = 31 => "186x125x170",
        M32 = 32 => "175x105x161",
        M33 = 33 => "167x109x161",
        M34 = 34 => "180x130x148",
        M35 = 35 => "190x104x148",
        M40 = 40 => "202x70x161",
        M41 = 41 => "212x95x154",
        M42 = 42 => "142x72x159",
        M43 = 43 => "159x96x133",
        M50 = 50 => "170x78x134",
        M51 = 51 => "142x72x143",
        M52 = 52 => "176x90x145",
        M53 = 53 => "184x85x145",
        M54 = 54 => "184x98x135",
    }
}

coded_choice! {
    /// Delivery set and packaging.
    pub enum PackageSet {
        No = 0 => "Нет",
        P20 = 20 => "Плотный картон, вспененный полиэтилен, сокращённый мануал",
        P21 = 21 => "Плотный картон, вспененный полиэтилен, полный мануал",
        P22 = 22 => "Плотный картон, краткая инструкция по вводу в эксплуатацию",
        P23 = 23 => "Простая упаковка: картон, две вставки из вспененного полиэтилена, пакет, силикагель. Полный мануал на русском языке.",
        P30 = 30 => "Простая упаковка: картон, две вставки из вспененного полиэтилена, пакет, силикагель. Информативная этикетка (модель, мощность, сеть, выходные параметры. Сокращённый мануал. Монтажный комплект пульта на дверь (постель, кабель 1.5м). Резиновые сальники (3шт)",
        P40 = 40 => "Плотный картон, надувная пузырчатая пленка, сокращённый мануал",
        P41 = 41 => "Плотный картон, надувная пузырчатая пленка, полный мануал",
        P42 = 42 => "Плотный картон, сокращённый мануал",
        P43 = 43 => "Плотный картон, надувная пузырчатая пленка, сокращённый мануал, отвертка для цепей управления",
        P50 = 50 => "Плотный картон, надувная пузырчатая пленка, полный мануал на русском языке.",
    }
}

coded_choice! {
    pub enum CaseQuality {
        Q10 = 10 => "Прочный корпус; неудобное снятие клеммной крышки, дребезжит крышка вентилятора",
        Q11 = 11 => "Прочный корпус. Плавные скругленные линии. При нажатии на кнопки на панели корпус скрипит немного",
        Q12 = 12 => "Прочный пластик, есть некритичный запах. Шумная работа кулера и дребезг.",
        Q20 = 20 => "Прочный пластик, есть некритичный запах",
        Q30 = 30 => "Прочный корпус, качественная сборка; чёрный матовый, не вонючий пластик",
        Q31 = 31 => "Прочный корпус, качественная сборка",
    }
}
