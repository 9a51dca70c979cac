//! Code tables for the enumerated header fields
//!
//! The numbering follows U-Boot's `include/image.h` and the display names
//! follow the long names printed by U-Boot itself. A header byte that falls
//! outside a table is not an error: the `*_name` lookups render it as an
//! `unsupported code` placeholder instead.

use std::borrow::Cow;
use std::fmt;

/// A closed table of header codes with a display name per entry
pub trait HeaderCode: Copy + TryFrom<u8> + 'static {
    /// Every entry, ordered by code
    const ALL: &'static [Self];

    fn code(self) -> u8;

    fn display_name(self) -> &'static str;

    /// Total lookup from a raw byte to a printable name
    fn name_of(code: u8) -> Cow<'static, str> {
        match Self::try_from(code) {
            Ok(value) => Cow::Borrowed(value.display_name()),
            Err(_) => Cow::Owned(unsupported(code)),
        }
    }
}

fn unsupported(code: u8) -> String {
    format!("unsupported code 0x{:02x}", code)
}

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident = $code:literal => $display:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $( $variant = $code, )+
        }

        impl HeaderCode for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant, )+ ];

            fn code(self) -> u8 {
                self as u8
            }

            fn display_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $display, )+
                }
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
                match value {
                    $( $code => Ok(Self::$variant), )+
                    other => Err(other),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.display_name())
            }
        }
    };
}

code_table! {
    /// Operating system types
    OsType {
        Invalid = 0 => "Invalid OS",
        Openbsd = 1 => "OpenBSD",
        Netbsd = 2 => "NetBSD",
        Freebsd = 3 => "FreeBSD",
        Bsd4_4 = 4 => "4_4BSD",
        Linux = 5 => "Linux",
        Svr4 = 6 => "SVR4",
        Esix = 7 => "Esix",
        Solaris = 8 => "Solaris",
        Irix = 9 => "Irix",
        Sco = 10 => "SCO",
        Dell = 11 => "Dell",
        Ncr = 12 => "NCR",
        Lynxos = 13 => "LynxOS",
        Vxworks = 14 => "VxWorks",
        Psos = 15 => "pSOS",
        Qnx = 16 => "QNX",
        Uboot = 17 => "U-Boot",
        Rtems = 18 => "RTEMS",
        Artos = 19 => "ARTOS",
        Unity = 20 => "Unity OS",
        Integrity = 21 => "INTEGRITY",
        Ose = 22 => "Enea OSE",
        Plan9 = 23 => "Plan 9",
        Openrtos = 24 => "OpenRTOS",
        ArmTrustedFirmware = 25 => "ARM Trusted Firmware",
        Tee = 26 => "Trusted Execution Environment",
        Opensbi = 27 => "RISC-V OpenSBI",
        Efi = 28 => "EFI Firmware",
    }
}

code_table! {
    /// CPU architectures
    Arch {
        Invalid = 0 => "Invalid ARCH",
        Alpha = 1 => "Alpha",
        Arm = 2 => "ARM",
        I386 = 3 => "Intel x86",
        Ia64 = 4 => "IA64",
        Mips = 5 => "MIPS",
        Mips64 = 6 => "MIPS 64 Bit",
        Powerpc = 7 => "PowerPC",
        S390 = 8 => "IBM S390",
        Sh = 9 => "SuperH",
        Sparc = 10 => "SPARC",
        Sparc64 = 11 => "SPARC 64 Bit",
        M68k = 12 => "M68K",
        Nios = 13 => "NIOS",
        Microblaze = 14 => "MicroBlaze",
        Nios2 = 15 => "NIOS II",
        Blackfin = 16 => "Blackfin",
        Avr32 = 17 => "AVR32",
        St200 = 18 => "STMicroelectronics ST200",
        Sandbox = 19 => "Sandbox",
        Nds32 = 20 => "NDS32",
        Openrisc = 21 => "OpenRISC 1000",
        Arm64 = 22 => "AArch64",
        Arc = 23 => "ARC",
        X86_64 = 24 => "AMD x86_64",
        Xtensa = 25 => "Xtensa",
        Riscv = 26 => "RISC-V",
    }
}

code_table! {
    /// U-Boot image types
    ImageType {
        Invalid = 0 => "Invalid Image",
        Standalone = 1 => "Standalone Program",
        Kernel = 2 => "Kernel Image",
        Ramdisk = 3 => "RAMDisk Image",
        Multi = 4 => "Multi-File Image",
        Firmware = 5 => "Firmware",
        Script = 6 => "Script",
        Filesystem = 7 => "Filesystem Image",
        FlattenedDeviceTree = 8 => "Flat Device Tree",
        Kwbimage = 9 => "Kirkwood Boot Image",
        Imximage = 10 => "Freescale i.MX Boot Image",
        Ublimage = 11 => "Davinci UBL image",
        Omapimage = 12 => "TI OMAP SPL With GP CH",
        Aisimage = 13 => "Davinci AIS image",
        KernelNoload = 14 => "Kernel Image (no loading done)",
        Pblimage = 15 => "Freescale PBL Boot Image",
        Mxsimage = 16 => "Freescale MXS Boot Image",
        Gpimage = 17 => "TI Keystone SPL Image",
        Atmelimage = 18 => "ATMEL ROM-Boot Image",
        Socfpgaimage = 19 => "Altera SoCFPGA CV/AV preloader",
        X86Setup = 20 => "x86 setup.bin",
        Lpc32xximage = 21 => "LPC32XX Boot Image",
        Loadable = 22 => "Loadable Image",
        Rkimage = 23 => "Rockchip Boot Image",
        Rksd = 24 => "Rockchip SD Boot Image",
        Rkspi = 25 => "Rockchip SPI Boot Image",
        Zynqimage = 26 => "Xilinx Zynq Boot Image",
        Zynqmpimage = 27 => "Xilinx ZynqMP Boot Image",
        Zynqmpbif = 28 => "Xilinx ZynqMP Boot Image (bif)",
        Fpga = 29 => "FPGA Image",
        Vybridimage = 30 => "Vybrid Boot Image",
        Tee = 31 => "Trusted Execution Environment Image",
        FirmwareIvt = 32 => "Firmware with HABv4 IVT",
        Pmmc = 33 => "TI Power Management Micro-Controller Firmware",
        Stm32image = 34 => "STMicroelectronics STM32 Image",
        SocfpgaimageV1 = 35 => "Altera SoCFPGA A10 preloader",
        Mtkimage = 36 => "MediaTek BootROM loadable Image",
        Imx8mimage = 37 => "NXP i.MX8M Boot Image",
        Imx8image = 38 => "NXP i.MX8 Boot Image",
        Copro = 39 => "Coprocessor Image",
        SunxiEgon = 40 => "Allwinner eGON Boot Image",
        SunxiToc0 = 41 => "Allwinner TOC0 Boot Image",
        FdtLegacy = 42 => "legacy Image with Flat Device Tree",
    }
}

code_table! {
    /// Compression types
    Compression {
        None = 0 => "uncompressed",
        Gzip = 1 => "gzip compressed",
        Bzip2 = 2 => "bzip2 compressed",
        Lzma = 3 => "lzma compressed",
        Lzo = 4 => "lzo compressed",
        Lz4 = 5 => "lz4 compressed",
        Zstd = 6 => "zstd compressed",
    }
}

impl Compression {
    /// File extension used for extracted parts
    pub fn extension(self) -> &'static str {
        match self {
            Self::None => "dat",
            Self::Gzip => "gz",
            Self::Bzip2 => "bz2",
            Self::Lzma => "lzma",
            Self::Lzo => "lzo",
            Self::Lz4 => "lz4",
            Self::Zstd => "zst",
        }
    }
}

pub fn os_name(code: u8) -> Cow<'static, str> {
    OsType::name_of(code)
}

pub fn arch_name(code: u8) -> Cow<'static, str> {
    Arch::name_of(code)
}

pub fn type_name(code: u8) -> Cow<'static, str> {
    ImageType::name_of(code)
}

pub fn comp_name(code: u8) -> Cow<'static, str> {
    Compression::name_of(code)
}
