//! Rendered files uploaded to the target host.
//!
//! Output is a pure function of its inputs so repeated runs upload
//! byte-identical files.

use crate::domain::entities::LinuxTargetConfig;

const RUNTIME: &str = "/usr/bin/dotnet";

/// systemd unit running `<publish>/<project>.dll` under the service account.
pub fn render_systemd_unit(project_name: &str, linux: &LinuxTargetConfig) -> String {
    let lines = [
        "[Unit]".to_string(),
        format!("Description=ASP.NET Core {}", project_name),
        String::new(),
        "[Service]".to_string(),
        format!("WorkingDirectory={}", linux.publish_folder),
        format!("ExecStart={} {}/{}.dll", RUNTIME, linux.publish_folder, project_name),
        "Restart=always".to_string(),
        "RestartSec=10".to_string(),
        "KillSignal=SIGINT".to_string(),
        format!("SyslogIdentifier={}", project_name),
        format!("User={}", linux.service_user),
        "Environment=ASPNETCORE_ENVIRONMENT=Production".to_string(),
        "Environment=DOTNET_PRINT_TELEMETRY_MESSAGE=false".to_string(),
        format!("Environment=ASPNETCORE_URLS=http://localhost:{}", linux.port),
        String::new(),
        "[Install]".to_string(),
        "WantedBy=multi-user.target".to_string(),
    ];
    join_lines(&lines)
}

/// nginx site: HTTP to HTTPS redirect plus a TLS reverse proxy to the app port.
pub fn render_nginx_site(project_name: &str, linux: &LinuxTargetConfig) -> String {
    let nginx = &linux.nginx;
    let server_names = nginx.host_names.join(" ");
    let lines = [
        "server {".to_string(),
        "    listen 80;".to_string(),
        format!("    server_name {};", server_names),
        "    location / {".to_string(),
        "        add_header Strict-Transport-Security max-age=15768000;".to_string(),
        "        return 301 https://$host$request_uri;".to_string(),
        "    }".to_string(),
        "}".to_string(),
        String::new(),
        "server {".to_string(),
        "    listen *:443              ssl;".to_string(),
        format!("    server_name               {};", server_names),
        format!(
            "    ssl_certificate           {};",
            nginx.certificate_path(project_name)
        ),
        format!(
            "    ssl_certificate_key       {};",
            nginx.private_key_path(project_name)
        ),
        "    ssl_protocols             TLSv1.2 TLSv1.3;".to_string(),
        "    ssl_prefer_server_ciphers on;".to_string(),
        "    ssl_ciphers               \"EECDH+AESGCM:EDH+AESGCM:AES256+EECDH:AES256+EDH\";"
            .to_string(),
        "    ssl_ecdh_curve            secp384r1;".to_string(),
        "    ssl_session_cache         shared:SSL:10m;".to_string(),
        "    ssl_session_tickets       off;".to_string(),
        "    ssl_stapling              on;".to_string(),
        "    ssl_stapling_verify       on;".to_string(),
        String::new(),
        "    add_header Strict-Transport-Security \"max-age=63072000; includeSubdomains; preload\";"
            .to_string(),
        "    add_header X-Frame-Options           DENY;".to_string(),
        "    add_header X-Content-Type-Options    nosniff;".to_string(),
        "    proxy_redirect   off;".to_string(),
        "    proxy_set_header Host              $host;".to_string(),
        "    proxy_set_header X-Real-IP         $remote_addr;".to_string(),
        "    proxy_set_header X-Forwarded-For   $proxy_add_x_forwarded_for;".to_string(),
        "    proxy_set_header X-Forwarded-Proto $scheme;".to_string(),
        "    client_max_body_size    10m;".to_string(),
        "    client_body_buffer_size 128k;".to_string(),
        "    proxy_connect_timeout   90;".to_string(),
        "    proxy_send_timeout      90;".to_string(),
        "    proxy_read_timeout      90;".to_string(),
        "    proxy_buffers           8 16k;".to_string(),
        "    proxy_buffer_size       16k;".to_string(),
        String::new(),
        "    location / {".to_string(),
        format!("        proxy_pass http://localhost:{};", nginx.app_port),
        "    }".to_string(),
        "}".to_string(),
    ];
    join_lines(&lines)
}

/// Per-service configuration consumed by the app at `/etc/dotship/<service>`.
pub fn render_service_config(linux: &LinuxTargetConfig) -> String {
    let value = if linux.service_config.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        linux.service_config.clone()
    };
    // Serializing a Value cannot fail: every map key is already a string.
    let mut out = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
