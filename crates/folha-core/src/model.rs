use serde::{Deserialize, Serialize};
use std::fmt;

/// Default for the monetary totals when their label is absent.
pub const ZERO_AMOUNT: &str = "0,00";

/// Separator used when joining itemized deductions into a single cell.
pub const LIST_SEPARATOR: &str = "; ";

/// The fixed set of fields extracted from each payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "Matrícula")]
    Matricula,
    #[serde(rename = "Nome")]
    Nome,
    #[serde(rename = "CPF")]
    Cpf,
    #[serde(rename = "Banco/Agência")]
    BancoAgencia,
    #[serde(rename = "Conta Corrente")]
    ContaCorrente,
    #[serde(rename = "Data Aposentadoria")]
    DataAposentadoria,
    #[serde(rename = "Total Rendimentos")]
    TotalRendimentos,
    #[serde(rename = "Total Descontos")]
    TotalDescontos,
    #[serde(rename = "Depósito FGTS")]
    DepositoFgts,
    #[serde(rename = "Total Líquido")]
    TotalLiquido,
    #[serde(rename = "Margem Consignável 30%")]
    Margem30,
    #[serde(rename = "Margem Consignável 70%")]
    Margem70,
    #[serde(rename = "Bancos Desconto")]
    BancosDesconto,
    #[serde(rename = "Parcelas Desconto")]
    ParcelasDesconto,
    #[serde(rename = "Valores Desconto")]
    ValoresDesconto,
}

impl Field {
    /// All fields in canonical column order.
    pub const ALL: [Field; 15] = [
        Field::Matricula,
        Field::Nome,
        Field::Cpf,
        Field::BancoAgencia,
        Field::ContaCorrente,
        Field::DataAposentadoria,
        Field::TotalRendimentos,
        Field::TotalDescontos,
        Field::DepositoFgts,
        Field::TotalLiquido,
        Field::Margem30,
        Field::Margem70,
        Field::BancosDesconto,
        Field::ParcelasDesconto,
        Field::ValoresDesconto,
    ];

    /// Column header as it appears in exported sheets.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Matricula => "Matrícula",
            Field::Nome => "Nome",
            Field::Cpf => "CPF",
            Field::BancoAgencia => "Banco/Agência",
            Field::ContaCorrente => "Conta Corrente",
            Field::DataAposentadoria => "Data Aposentadoria",
            Field::TotalRendimentos => "Total Rendimentos",
            Field::TotalDescontos => "Total Descontos",
            Field::DepositoFgts => "Depósito FGTS",
            Field::TotalLiquido => "Total Líquido",
            Field::Margem30 => "Margem Consignável 30%",
            Field::Margem70 => "Margem Consignável 70%",
            Field::BancosDesconto => "Bancos Desconto",
            Field::ParcelasDesconto => "Parcelas Desconto",
            Field::ValoresDesconto => "Valores Desconto",
        }
    }

    /// ASCII key accepted on the command line and in profiles.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Matricula => "matricula",
            Field::Nome => "nome",
            Field::Cpf => "cpf",
            Field::BancoAgencia => "banco_agencia",
            Field::ContaCorrente => "conta_corrente",
            Field::DataAposentadoria => "data_aposentadoria",
            Field::TotalRendimentos => "total_rendimentos",
            Field::TotalDescontos => "total_descontos",
            Field::DepositoFgts => "deposito_fgts",
            Field::TotalLiquido => "total_liquido",
            Field::Margem30 => "margem_30",
            Field::Margem70 => "margem_70",
            Field::BancosDesconto => "bancos_desconto",
            Field::ParcelasDesconto => "parcelas_desconto",
            Field::ValoresDesconto => "valores_desconto",
        }
    }

    /// Value a record carries when the field's pattern does not match.
    pub fn default_value(&self) -> &'static str {
        match self {
            Field::TotalRendimentos
            | Field::TotalDescontos
            | Field::DepositoFgts
            | Field::TotalLiquido => ZERO_AMOUNT,
            _ => "",
        }
    }

    /// Resolve a field from its exact header or its ASCII key (case-insensitive).
    pub fn from_name(s: &str) -> Option<Field> {
        let s = s.trim();
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s || f.key().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One record's worth of trimmed, non-empty text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordBlock {
    pub lines: Vec<String>,
}

impl RecordBlock {
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        RecordBlock { lines }
    }

    pub fn first_line(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }
}

/// A single itemized bank deduction (consigned loan installment).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub bank: String,
    pub installment: String,
    pub value: String,
}

/// Fields extracted from one payment record.
///
/// Monetary values keep the report's decimal-comma text verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(rename = "Matrícula")]
    pub matricula: String,
    #[serde(rename = "Nome")]
    pub nome: String,
    #[serde(rename = "CPF")]
    pub cpf: String,
    #[serde(rename = "Banco/Agência")]
    pub banco_agencia: String,
    #[serde(rename = "Conta Corrente")]
    pub conta_corrente: String,
    #[serde(rename = "Data Aposentadoria")]
    pub data_aposentadoria: String,
    #[serde(rename = "Total Rendimentos")]
    pub total_rendimentos: String,
    #[serde(rename = "Total Descontos")]
    pub total_descontos: String,
    #[serde(rename = "Depósito FGTS")]
    pub deposito_fgts: String,
    #[serde(rename = "Total Líquido")]
    pub total_liquido: String,
    #[serde(rename = "Margem Consignável 30%")]
    pub margem_30: String,
    #[serde(rename = "Margem Consignável 70%")]
    pub margem_70: String,
    #[serde(rename = "Bancos Desconto")]
    pub bancos_desconto: String,
    #[serde(rename = "Parcelas Desconto")]
    pub parcelas_desconto: String,
    #[serde(rename = "Valores Desconto")]
    pub valores_desconto: String,
}

impl PersonRecord {
    /// A record with only the ID set and every other field at its default.
    pub fn with_id(matricula: impl Into<String>) -> Self {
        PersonRecord {
            matricula: matricula.into(),
            nome: String::new(),
            cpf: String::new(),
            banco_agencia: String::new(),
            conta_corrente: String::new(),
            data_aposentadoria: String::new(),
            total_rendimentos: ZERO_AMOUNT.to_string(),
            total_descontos: ZERO_AMOUNT.to_string(),
            deposito_fgts: ZERO_AMOUNT.to_string(),
            total_liquido: ZERO_AMOUNT.to_string(),
            margem_30: String::new(),
            margem_70: String::new(),
            bancos_desconto: String::new(),
            parcelas_desconto: String::new(),
            valores_desconto: String::new(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Matricula => &self.matricula,
            Field::Nome => &self.nome,
            Field::Cpf => &self.cpf,
            Field::BancoAgencia => &self.banco_agencia,
            Field::ContaCorrente => &self.conta_corrente,
            Field::DataAposentadoria => &self.data_aposentadoria,
            Field::TotalRendimentos => &self.total_rendimentos,
            Field::TotalDescontos => &self.total_descontos,
            Field::DepositoFgts => &self.deposito_fgts,
            Field::TotalLiquido => &self.total_liquido,
            Field::Margem30 => &self.margem_30,
            Field::Margem70 => &self.margem_70,
            Field::BancosDesconto => &self.bancos_desconto,
            Field::ParcelasDesconto => &self.parcelas_desconto,
            Field::ValoresDesconto => &self.valores_desconto,
        }
    }

    pub(crate) fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Matricula => &mut self.matricula,
            Field::Nome => &mut self.nome,
            Field::Cpf => &mut self.cpf,
            Field::BancoAgencia => &mut self.banco_agencia,
            Field::ContaCorrente => &mut self.conta_corrente,
            Field::DataAposentadoria => &mut self.data_aposentadoria,
            Field::TotalRendimentos => &mut self.total_rendimentos,
            Field::TotalDescontos => &mut self.total_descontos,
            Field::DepositoFgts => &mut self.deposito_fgts,
            Field::TotalLiquido => &mut self.total_liquido,
            Field::Margem30 => &mut self.margem_30,
            Field::Margem70 => &mut self.margem_70,
            Field::BancosDesconto => &mut self.bancos_desconto,
            Field::ParcelasDesconto => &mut self.parcelas_desconto,
            Field::ValoresDesconto => &mut self.valores_desconto,
        }
    }
}

/// Ordered subset of fields chosen for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    fields: Vec<Field>,
}

impl FieldSelection {
    pub fn all() -> Self {
        FieldSelection {
            fields: Field::ALL.to_vec(),
        }
    }

    /// Build a selection, dropping repeated fields while keeping first-seen order.
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Self {
        let mut out: Vec<Field> = Vec::new();
        for f in fields {
            if !out.contains(&f) {
                out.push(f);
            }
        }
        FieldSelection { fields: out }
    }

    /// Parse field names or keys, failing on the first unknown one.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, crate::error::FolhaError> {
        let fields = names
            .iter()
            .map(|n| {
                Field::from_name(n.as_ref())
                    .ok_or_else(|| crate::error::FolhaError::UnknownField(n.as_ref().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FieldSelection::new(fields))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.fields.iter().map(Field::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Default for FieldSelection {
    fn default() -> Self {
        Self::all()
    }
}
