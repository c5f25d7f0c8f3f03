use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// A camada de apresentação decide como exibir cada variante; aqui só
// classificamos o que aconteceu.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Já existe um produto com o nome '{0}'")]
    DuplicateName(String),

    #[error("Já existe um usuário com este número de identificação")]
    DuplicateIdentifier,

    #[error("Papel inválido: '{0}' (esperado 'admin' ou 'client')")]
    InvalidRole(String),

    // A conta administradora é reservada: não pode ser excluída.
    #[error("Operação proibida sobre a conta administradora")]
    ForbiddenOperation,

    #[error("Identificação ou senha incorreta")]
    InvalidCredentials,

    #[error("Usuário não encontrado")]
    AccountNotFound,

    #[error("Produto não encontrado: {0}")]
    ProductNotFound(String),

    #[error("Cotação não encontrada: {0}")]
    QuoteNotFound(i64),

    #[error("Quantidade inválida: {0}")]
    InvalidQuantity(i64),

    #[error("Ambiente {0} não existe na cotação")]
    RoomNotFound(u32),

    #[error("A cotação não possui nenhum produto selecionado")]
    EmptyQuote,

    #[error("A cotação já foi confirmada e não pode mais ser alterada")]
    QuoteAlreadyCommitted,

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar o PDF: {0}")]
    PdfError(String),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}
