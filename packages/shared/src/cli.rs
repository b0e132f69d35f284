//! Command-line surface shared by both binaries.

use std::net::{IpAddr, SocketAddr};

use clap::{Args, Parser, error::ErrorKind};

/// Exit status for a wrong argument count or an unparsable argument.
pub const USAGE_EXIT_CODE: i32 = 1;

/// The two positional arguments every Hiroba binary takes.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// IP address of the chat server
    #[arg(value_name = "IPAddress")]
    pub ip: IpAddr,

    /// Port number of the chat server
    #[arg(value_name = "port")]
    pub port: u16,
}

impl Endpoint {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

/// Parse the process arguments, exiting with [`USAGE_EXIT_CODE`] on misuse.
///
/// clap exits with status 2 on usage errors; both binaries exit with 1 instead.
/// `--help` and `--version` still exit with 0.
pub fn parse_args_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(USAGE_EXIT_CODE);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct TestArgs {
        #[command(flatten)]
        endpoint: Endpoint,
    }

    #[test]
    fn test_endpoint_parses_ip_and_port() {
        // テスト項目: IP アドレスとポート番号の 2 つの位置引数が解析される
        // given (前提条件):
        let argv = ["hiroba", "127.0.0.1", "9000"];

        // when (操作):
        let args = TestArgs::try_parse_from(argv).unwrap();

        // then (期待する結果):
        assert_eq!(
            args.endpoint.socket_addr(),
            "127.0.0.1:9000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_endpoint_rejects_missing_port() {
        // テスト項目: 引数が 1 つしかない場合はエラーになる
        // given (前提条件):
        let argv = ["hiroba", "127.0.0.1"];

        // when (操作):
        let result = TestArgs::try_parse_from(argv);

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_endpoint_rejects_extra_argument() {
        // テスト項目: 引数が 3 つ以上ある場合はエラーになる
        // given (前提条件):
        let argv = ["hiroba", "127.0.0.1", "9000", "extra"];

        // when (操作):
        let result = TestArgs::try_parse_from(argv);

        // then (期待する結果):
        assert_eq!(result.unwrap_err().kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_endpoint_rejects_invalid_port() {
        // テスト項目: ポート番号が数値でない場合はエラーになる
        // given (前提条件):
        let argv = ["hiroba", "127.0.0.1", "not-a-port"];

        // when (操作):
        let result = TestArgs::try_parse_from(argv);

        // then (期待する結果):
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ValueValidation);
    }
}
